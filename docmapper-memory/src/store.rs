//! In-memory storage implementation of the mapper's backend boundary.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document};
use mea::rwlock::RwLock;

use docmapper_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{MapperError, MapperResult},
    query::Filter,
};

use crate::evaluator;

type CollectionMap = HashMap<String, Document>;
type StoreMap = HashMap<String, CollectionMap>;

/// Thread-safe in-memory document storage backend.
///
/// Documents are kept per collection, keyed by their identifier. The store is
/// cloneable; clones share the same underlying data. Queries scan the whole
/// collection, which is fine for the test-sized data sets this backend is
/// meant for.
#[derive(Default, Clone, Debug)]
pub struct MemoryStore {
    store: Arc<RwLock<StoreMap>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing a `MemoryStore`.
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder
    }
}

/// Storage key for a document, derived from its `_id` value.
fn id_key(document: &Document, collection: &str) -> MapperResult<String> {
    match document.get("_id") {
        Some(Bson::ObjectId(oid)) => Ok(oid.to_hex()),
        Some(Bson::String(s)) => Ok(s.clone()),
        Some(Bson::Null) | None => Err(MapperError::InvalidDocument(format!(
            "document for collection {collection} has no _id"
        ))),
        Some(other) => Ok(other.to_string()),
    }
}

#[async_trait]
impl StoreBackend for MemoryStore {
    async fn insert_one(&self, document: Document, collection: &str) -> MapperResult<()> {
        let mut store = self.store.write().await;
        let collection_map = store.entry(collection.to_string()).or_default();

        let key = id_key(&document, collection)?;
        if collection_map.contains_key(&key) {
            return Err(MapperError::DocumentAlreadyExists(
                key,
                collection.to_string(),
            ));
        }

        collection_map.insert(key, document);

        Ok(())
    }

    async fn update_one(
        &self,
        filter: Filter,
        document: Document,
        collection: &str,
    ) -> MapperResult<()> {
        let mut store = self.store.write().await;
        let collection_map = store
            .get_mut(collection)
            .ok_or_else(|| MapperError::CollectionNotFound(collection.to_string()))?;

        let target = collection_map
            .values_mut()
            .find(|stored| evaluator::matches(stored, &filter))
            .ok_or_else(|| {
                MapperError::DocumentNotFound(
                    filter.to_string(),
                    collection.to_string(),
                )
            })?;

        // The stored identifier survives the replacement.
        let id = target.get("_id").cloned();
        let mut replacement = document;
        if let Some(id) = id {
            replacement.insert("_id", id);
        }
        *target = replacement;

        Ok(())
    }

    async fn delete_one(&self, filter: Filter, collection: &str) -> MapperResult<()> {
        let mut store = self.store.write().await;
        let collection_map = store
            .get_mut(collection)
            .ok_or_else(|| MapperError::CollectionNotFound(collection.to_string()))?;

        let key = collection_map
            .iter()
            .find(|(_, stored)| evaluator::matches(stored, &filter))
            .map(|(key, _)| key.clone())
            .ok_or_else(|| {
                MapperError::DocumentNotFound(
                    filter.to_string(),
                    collection.to_string(),
                )
            })?;

        collection_map.remove(&key);

        Ok(())
    }

    async fn count(&self, collection: &str) -> MapperResult<u64> {
        let store = self.store.read().await;

        Ok(store
            .get(collection)
            .map(|collection_map| collection_map.len() as u64)
            .unwrap_or(0))
    }

    async fn find(
        &self,
        filter: Option<Filter>,
        collection: &str,
    ) -> MapperResult<Vec<Document>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        Ok(match filter {
            Some(filter) => collection_map
                .values()
                .filter(|stored| evaluator::matches(stored, &filter))
                .cloned()
                .collect(),
            None => collection_map.values().cloned().collect(),
        })
    }
}

/// Builder for [`MemoryStore`] instances.
#[derive(Default)]
pub struct MemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for MemoryStoreBuilder {
    type Backend = MemoryStore;

    async fn build(self) -> MapperResult<Self::Backend> {
        Ok(MemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};
    use futures::executor::block_on;

    fn stored(id: ObjectId, name: &str) -> Document {
        doc! { "_id": id, "name": name }
    }

    #[test]
    fn insert_then_count_and_find() {
        let store = MemoryStore::new();
        let id = ObjectId::new();

        block_on(store.insert_one(stored(id, "pepe"), "people")).unwrap();

        assert_eq!(block_on(store.count("people")).unwrap(), 1);
        let all = block_on(store.find(None, "people")).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].get("name"), Some(&Bson::from("pepe")));
    }

    #[test]
    fn duplicate_insert_is_an_error() {
        let store = MemoryStore::new();
        let id = ObjectId::new();

        block_on(store.insert_one(stored(id, "a"), "people")).unwrap();
        let err = block_on(store.insert_one(stored(id, "b"), "people")).unwrap_err();

        assert!(matches!(err, MapperError::DocumentAlreadyExists(..)));
    }

    #[test]
    fn insert_without_identifier_is_rejected() {
        let store = MemoryStore::new();

        let err = block_on(store.insert_one(doc! { "name": "x" }, "people")).unwrap_err();
        assert!(matches!(err, MapperError::InvalidDocument(_)));
    }

    #[test]
    fn update_preserves_stored_identifier() {
        let store = MemoryStore::new();
        let id = ObjectId::new();
        block_on(store.insert_one(stored(id, "before"), "people")).unwrap();

        block_on(store.update_one(
            Filter::new().eq("_id", id),
            doc! { "name": "after" },
            "people",
        ))
        .unwrap();

        let found = block_on(store.find(Some(Filter::new().eq("_id", id)), "people")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("name"), Some(&Bson::from("after")));
        assert_eq!(found[0].get("_id"), Some(&Bson::ObjectId(id)));
    }

    #[test]
    fn update_without_match_is_not_found() {
        let store = MemoryStore::new();
        block_on(store.insert_one(stored(ObjectId::new(), "a"), "people")).unwrap();

        let err = block_on(store.update_one(
            Filter::new().eq("_id", ObjectId::new()),
            doc! { "name": "b" },
            "people",
        ))
        .unwrap_err();

        assert!(matches!(err, MapperError::DocumentNotFound(..)));
        // The message names the filter constraints, not a struct dump.
        assert!(err.to_string().contains("_id="));
        assert!(!err.to_string().contains("Filter {"));
    }

    #[test]
    fn delete_removes_exactly_one_match() {
        let store = MemoryStore::new();
        let id = ObjectId::new();
        block_on(store.insert_one(stored(id, "a"), "people")).unwrap();
        block_on(store.insert_one(stored(ObjectId::new(), "b"), "people")).unwrap();

        block_on(store.delete_one(Filter::new().eq("_id", id), "people")).unwrap();

        assert_eq!(block_on(store.count("people")).unwrap(), 1);
    }

    #[test]
    fn missing_collections_read_as_empty() {
        let store = MemoryStore::new();

        assert_eq!(block_on(store.count("nowhere")).unwrap(), 0);
        assert!(block_on(store.find(None, "nowhere")).unwrap().is_empty());
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let clone = store.clone();

        block_on(store.insert_one(stored(ObjectId::new(), "a"), "people")).unwrap();
        assert_eq!(block_on(clone.count("people")).unwrap(), 1);
    }
}
