//! Error types for cashflow-store

use thiserror::Error;

/// Errors surfaced by a document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named collection does not exist
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// A document that should be a JSON object was not one
    #[error("Document is not a JSON object")]
    NotAnObject,

    /// The backing store rejected the operation
    #[error("Store operation failed: {0}")]
    Backend(String),
}
