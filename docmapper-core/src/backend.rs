//! Storage backend abstraction: the boundary the mapper consumes.
//!
//! The core delegates every persistence operation to a [`StoreBackend`].
//! Implementations own the connection and collection handles; the mapper only
//! hands them flat documents, equality filters and collection names. A
//! backend reports failure distinctly from success for every operation and
//! the mapper propagates those failures unmodified.

use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::{error::MapperResult, query::Filter};

/// Abstract interface for document storage backends.
///
/// Implementations must be shareable across tasks (`Send + Sync`); the
/// mapper itself issues one blocking-style awaited call at a time.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts one document into a collection.
    ///
    /// The collection is created automatically if it does not exist. The
    /// document carries its own `_id`; inserting a duplicate identifier is
    /// an error, never a partial write.
    async fn insert_one(&self, document: Document, collection: &str) -> MapperResult<()>;

    /// Replaces the non-identifier fields of the first document matching
    /// `filter` with `document`.
    async fn update_one(
        &self,
        filter: Filter,
        document: Document,
        collection: &str,
    ) -> MapperResult<()>;

    /// Deletes the first document matching `filter`.
    async fn delete_one(&self, filter: Filter, collection: &str) -> MapperResult<()>;

    /// Number of documents in a collection.
    async fn count(&self, collection: &str) -> MapperResult<u64>;

    /// Returns the documents matching `filter`; an absent filter matches all
    /// documents in the collection.
    async fn find(&self, filter: Option<Filter>, collection: &str)
    -> MapperResult<Vec<Document>>;
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn insert_one(&self, document: Document, collection: &str) -> MapperResult<()> {
        (*self).insert_one(document, collection).await
    }

    async fn update_one(
        &self,
        filter: Filter,
        document: Document,
        collection: &str,
    ) -> MapperResult<()> {
        (*self)
            .update_one(filter, document, collection)
            .await
    }

    async fn delete_one(&self, filter: Filter, collection: &str) -> MapperResult<()> {
        (*self).delete_one(filter, collection).await
    }

    async fn count(&self, collection: &str) -> MapperResult<u64> {
        (*self).count(collection).await
    }

    async fn find(
        &self,
        filter: Option<Filter>,
        collection: &str,
    ) -> MapperResult<Vec<Document>> {
        (*self).find(filter, collection).await
    }
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> MapperResult<Self::Backend>;
}
