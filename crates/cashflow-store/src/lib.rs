//! Document store collaborator for cashflow
//!
//! The store holds two collections, `accounts` and `transactions`, each a
//! sequence of JSON documents addressed by a server-assigned `_id`. It
//! provides find-all, insert, field-level update and remove-by-id, and
//! nothing else: no cross-call transaction scope, no schema enforcement.
//! Updating or removing an absent identifier is a silent no-op.

pub mod error;
pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub use error::StoreError;
pub use memory::MemoryStore;

/// Field name of the store-assigned document identifier
pub const ID_FIELD: &str = "_id";

/// The `accounts` collection name
pub const ACCOUNTS: &str = "accounts";

/// The `transactions` collection name
pub const TRANSACTIONS: &str = "transactions";

/// A document store holding JSON documents in named collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document in the collection in the store's natural order
    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Insert a document, assigning it a fresh `_id`. Returns the stored
    /// document including the identifier.
    async fn insert(&self, collection: &str, document: Value) -> Result<Value, StoreError>;

    /// Set the given fields on the document with the given id. Absent ids
    /// are silently ignored.
    async fn set_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Remove the document with the given id. Absent ids are silently
    /// ignored.
    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Extract a document's `_id` as a string, if present
pub fn document_id(document: &Value) -> Option<&str> {
    document.get(ID_FIELD).and_then(Value::as_str)
}
