#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Document-store adapter boundary.
//!
//! The external document store exposes named collections of JSON
//! documents with get-all/get-by-id/create/update/delete semantics and
//! last-write-wins shallow merges on update — no transactions across
//! documents. [`DocumentStore`] captures exactly that contract;
//! [`MemoryStore`] implements it in-process for tests, seeding, and the
//! demo CLI. [`DocLocks`] layers on the per-document write serialization
//! that the read-modify-write recomputation pattern requires.

pub mod locks;
pub mod memory;
pub mod typed;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use locks::DocLocks;
pub use memory::MemoryStore;

/// Collection names used by the platform.
pub mod collections {
    /// Waste report documents.
    pub const REPORTS: &str = "wasteReports";
    /// Ward documents.
    pub const WARDS: &str = "wards";
    /// User documents.
    pub const USERS: &str = "users";
    /// Truck documents.
    pub const TRUCKS: &str = "trucks";
    /// Policy recommendation documents.
    pub const POLICIES: &str = "policies";
}

/// Errors from document-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested document does not exist.
    #[error("document {collection}/{id} not found")]
    NotFound {
        /// Collection name.
        collection: String,
        /// Document ID.
        id: String,
    },

    /// A document with this ID already exists.
    #[error("document {collection}/{id} already exists")]
    Duplicate {
        /// Collection name.
        collection: String,
        /// Document ID.
        id: String,
    },

    /// The document is missing its `id` field or is not a JSON object.
    #[error("invalid document for {collection}: {message}")]
    InvalidDocument {
        /// Collection name.
        collection: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A stored document failed to deserialize into its expected shape.
    #[error("corrupt document in {collection}: {source}")]
    Corrupt {
        /// Collection name.
        collection: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The backing store failed.
    #[error("store backend error: {message}")]
    Backend {
        /// Description of what went wrong.
        message: String,
    },
}

/// Contract with the external document store.
///
/// Documents are JSON objects carrying an `id` string field. `update`
/// performs a last-write-wins shallow merge of the patch's top-level
/// fields into the stored document. Reads across documents are
/// eventually consistent with respect to each other; callers must not
/// assume cross-document atomicity.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document in a collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the store is unreachable.
    async fn get_all(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Returns one document by ID, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the store is unreachable.
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Inserts a new document. The document must be a JSON object with a
    /// string `id` field.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidDocument`] for non-object or id-less
    /// documents, [`StoreError::Duplicate`] if the ID is taken, or
    /// [`StoreError::Backend`] if the store is unreachable.
    async fn create(&self, collection: &str, doc: Value) -> Result<(), StoreError>;

    /// Merges the patch's top-level fields into an existing document
    /// (last write wins).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the document does not exist,
    /// [`StoreError::InvalidDocument`] for non-object patches, or
    /// [`StoreError::Backend`] if the store is unreachable.
    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError>;

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the document does not exist,
    /// or [`StoreError::Backend`] if the store is unreachable.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Extracts the `id` field from a document about to be created.
///
/// # Errors
///
/// Returns [`StoreError::InvalidDocument`] if the document is not an
/// object or lacks a string `id`.
pub fn document_id(collection: &str, doc: &Value) -> Result<String, StoreError> {
    doc.as_object()
        .and_then(|obj| obj.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StoreError::InvalidDocument {
            collection: collection.to_string(),
            message: "expected a JSON object with a string `id` field".to_string(),
        })
}
