//! In-process [`DocumentStore`] implementation.
//!
//! Backs tests, the demo seed, and the CLI. Matches the external store's
//! semantics: shallow last-write-wins merge on update, no cross-document
//! transactions.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{DocumentStore, StoreError, document_id};

/// In-memory document store: collection name -> (id -> document).
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Whether a collection holds no documents.
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn create(&self, collection: &str, doc: Value) -> Result<(), StoreError> {
        let id = document_id(collection, &doc)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(&id) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id,
            });
        }
        docs.insert(id, doc);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::InvalidDocument {
                collection: collection.to_string(),
                message: "update patch must be a JSON object".to_string(),
            });
        };

        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        let Value::Object(target) = doc else {
            return Err(StoreError::InvalidDocument {
                collection: collection.to_string(),
                message: format!("stored document {id} is not a JSON object"),
            });
        };

        // Shallow merge: top-level fields win wholesale, matching the
        // external store's last-write-wins behavior.
        for (key, value) in patch {
            target.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id));
        if removed.is_none() {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
