//! The persistence protocol: save / update / remove / count / find.
//!
//! [`DocumentStore`] wraps an injected backend and drives the instance
//! lifecycle: transient instances gain an identifier on `save`, persisted
//! ones can be updated or removed, and `remove` returns them to the
//! transient state so they can be saved again under a new identifier. The
//! backend is passed in once at construction; there is no hidden global
//! client state.
//!
//! # Example
//!
//! ```ignore
//! use docmapper::store::DocumentStore;
//!
//! let store = DocumentStore::new(backend);
//! let mut user = User::new();
//! user.set_name("Alice")?;
//! store.save(&mut user).await?;
//! let found: Vec<User> = store.find_by("find_by_name", vec!["Alice".into()]).await?;
//! ```

use bson::{Bson, oid::ObjectId};

use crate::{
    backend::StoreBackend,
    codec,
    error::{MapperError, MapperResult},
    finder,
    model::Model,
    query::Filter,
    schema::ID_FIELD,
};

/// A document store bound to a specific backend implementation.
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a store over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Persists a transient instance.
    ///
    /// Order of operations: `before_save` hook (a failure aborts everything,
    /// before any identifier is generated), identifier generation when the
    /// instance has none, encode, insert, `after_save` hook. A failing
    /// `after_save` propagates but the insert stays committed.
    pub async fn save<M: Model>(&self, instance: &mut M) -> MapperResult<()> {
        instance.before_save()?;

        if instance.record().is_transient() {
            instance.record_mut().assign_id(ObjectId::new())?;
        }

        let document = codec::to_document(instance.record());
        self.backend
            .insert_one(document, M::schema().collection())
            .await?;

        instance.after_save()
    }

    /// Writes the current field values of a persisted instance back to the
    /// store, filtered by its identifier. The identifier itself is excluded
    /// from the written fields and never changes.
    pub async fn update<M: Model>(&self, instance: &M) -> MapperResult<()> {
        let id = instance.record().id();
        if matches!(id, Bson::Null) {
            return Err(MapperError::MissingIdentifier);
        }

        let mut document = codec::to_document(instance.record());
        document.remove(ID_FIELD);

        self.backend
            .update_one(
                Filter::new().eq(ID_FIELD, id.clone()),
                document,
                M::schema().collection(),
            )
            .await
    }

    /// Deletes a persisted instance from the store and clears its
    /// identifier, returning it to the transient state.
    pub async fn remove<M: Model>(&self, instance: &mut M) -> MapperResult<()> {
        let id = instance.record().id().clone();
        if matches!(id, Bson::Null) {
            return Err(MapperError::MissingIdentifier);
        }

        self.backend
            .delete_one(Filter::new().eq(ID_FIELD, id), M::schema().collection())
            .await?;

        instance.record_mut().clear_id()
    }

    /// Number of documents in the type's collection.
    pub async fn count<M: Model>(&self) -> MapperResult<u64> {
        self.backend.count(M::schema().collection()).await
    }

    /// Queries the type's collection and decodes every returned document.
    ///
    /// An absent filter matches all documents. The populate hook runs once
    /// per returned instance; zero matches yield an empty vector, never an
    /// error.
    pub async fn find<M: Model>(&self, filter: Option<Filter>) -> MapperResult<Vec<M>> {
        self.backend
            .find(filter, M::schema().collection())
            .await?
            .into_iter()
            .map(codec::from_document)
            .collect()
    }

    /// Resolves a dynamic `find_by_<field>[_and_<field>]*` selector and runs
    /// the resulting equality query.
    ///
    /// A name that does not parse as a finder over the type's registry fails
    /// with [`MapperError::UnrecognizedSelector`] without touching the store;
    /// callers wanting the raw fall-through sentinel can use
    /// [`finder::parse`] directly.
    pub async fn find_by<M: Model>(
        &self,
        selector: &str,
        args: Vec<Bson>,
    ) -> MapperResult<Vec<M>> {
        match finder::parse(selector, M::schema(), &args) {
            Ok(filter) => self.find(Some(filter)).await,
            Err(finder::NotAFinder) => {
                Err(MapperError::UnrecognizedSelector(selector.to_string()))
            }
        }
    }
}
