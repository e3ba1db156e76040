//! Typed accessors over the JSON document contract.
//!
//! Thin wrappers that serialize/deserialize the document types from
//! `waste_grid_store_models` at the store boundary, so engine code works
//! with typed documents and never touches raw [`serde_json::Value`].

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{DocumentStore, StoreError};

/// Fetches every document in a collection, deserialized as `T`.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] if any stored document does not match
/// the expected shape, or propagates backend errors.
pub async fn all<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
) -> Result<Vec<T>, StoreError> {
    store
        .get_all(collection)
        .await?
        .into_iter()
        .map(|doc| {
            serde_json::from_value(doc).map_err(|source| StoreError::Corrupt {
                collection: collection.to_string(),
                source,
            })
        })
        .collect()
}

/// Fetches one document by ID, deserialized as `T`.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] if the stored document does not match
/// the expected shape, or propagates backend errors.
pub async fn by_id<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> Result<Option<T>, StoreError> {
    store
        .get_by_id(collection, id)
        .await?
        .map(|doc| {
            serde_json::from_value(doc).map_err(|source| StoreError::Corrupt {
                collection: collection.to_string(),
                source,
            })
        })
        .transpose()
}

/// Inserts a typed document.
///
/// # Errors
///
/// Propagates [`StoreError`] from the underlying create.
pub async fn insert<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    doc: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(doc).map_err(|e| StoreError::InvalidDocument {
        collection: collection.to_string(),
        message: e.to_string(),
    })?;
    store.create(collection, value).await
}

/// Replaces a document wholesale with a typed value.
///
/// Serializing the full document and merging it shallowly replaces every
/// top-level field, which is equivalent to a full overwrite for our
/// document shapes.
///
/// # Errors
///
/// Propagates [`StoreError`] from the underlying update.
pub async fn replace<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    doc: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(doc).map_err(|e| StoreError::InvalidDocument {
        collection: collection.to_string(),
        message: e.to_string(),
    })?;
    store.update(collection, id, value).await
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::MemoryStore;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Doc {
        id: String,
        count: u32,
    }

    #[tokio::test]
    async fn typed_roundtrip() {
        let store = MemoryStore::new();
        let doc = Doc {
            id: "d1".to_string(),
            count: 3,
        };
        insert(&store, "docs", &doc).await.unwrap();

        let fetched: Option<Doc> = by_id(&store, "docs", "d1").await.unwrap();
        assert_eq!(fetched, Some(doc.clone()));

        let updated = Doc { count: 4, ..doc };
        replace(&store, "docs", "d1", &updated).await.unwrap();

        let docs: Vec<Doc> = all(&store, "docs").await.unwrap();
        assert_eq!(docs, vec![updated]);
    }

    #[tokio::test]
    async fn corrupt_documents_surface_as_errors() {
        let store = MemoryStore::new();
        store
            .create("docs", serde_json::json!({ "id": "bad", "count": "NaN" }))
            .await
            .unwrap();

        let result: Result<Vec<Doc>, _> = all(&store, "docs").await;
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }
}
