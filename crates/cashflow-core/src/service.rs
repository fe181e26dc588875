//! Ledger service abstraction
//!
//! The aggregation core talks to the API through this trait so it stays
//! independent of any transport. The HTTP implementation lives in
//! `cashflow-client`; tests substitute an in-memory one.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::{BatchStatus, LedgerRecord};

/// Remote operations on one ledger collection
#[async_trait]
pub trait LedgerService<R: LedgerRecord>: Send + Sync {
    /// Fetch every record in the collection, store natural order
    async fn list(&self) -> Result<Vec<R>, CoreError>;

    /// Create a record from a validated draft; returns the stored record
    /// including its assigned identifier
    async fn create(&self, draft: &R::Draft) -> Result<R, CoreError>;

    /// Submit a batch of amount changes (id to new amount text). The
    /// result is one aggregate flag for the whole batch.
    async fn update(&self, changes: &HashMap<String, String>) -> Result<BatchStatus, CoreError>;

    /// Remove the record with the given id. Absent ids still report
    /// success.
    async fn delete(&self, id: &str) -> Result<BatchStatus, CoreError>;
}
