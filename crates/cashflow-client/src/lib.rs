//! HTTP client for the cashflow ledger API
//!
//! Implements [`LedgerService`] over the JSON API: GET for the full
//! collection, POST for create, PUT with an id-to-amount map, DELETE with
//! an `{"id"}` body. No retries, no timeouts beyond the transport's
//! defaults, no cancellation once a request is issued.

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::StatusCode;

use cashflow_core::{BatchStatus, CoreError, LedgerRecord, LedgerService};

/// A [`LedgerService`] speaking to one collection endpoint
pub struct HttpLedgerService<R: LedgerRecord> {
    client: reqwest::Client,
    url: String,
    _record: PhantomData<fn() -> R>,
}

impl<R: LedgerRecord> HttpLedgerService<R> {
    /// Point the service at an API base URL; the collection path comes
    /// from the record type.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/{}", base_url.trim_end_matches('/'), R::PATH),
            _record: PhantomData,
        }
    }

    /// The full collection URL this service targets
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn transport(error: reqwest::Error) -> CoreError {
    CoreError::Transport(error.to_string())
}

#[async_trait]
impl<R: LedgerRecord> LedgerService<R> for HttpLedgerService<R> {
    async fn list(&self) -> Result<Vec<R>, CoreError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        response
            .json::<Vec<R>>()
            .await
            .map_err(|e| CoreError::Protocol(e.to_string()))
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, CoreError> {
        let response = self
            .client
            .post(&self.url)
            .json(draft)
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            // Server-side validation echo; the inline message travels back
            let body: serde_json::Value = response
                .json()
                .await
                .map_err(|e| CoreError::Protocol(e.to_string()))?;
            let message = body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("Validation failed")
                .to_string();
            return Err(CoreError::Validation { message });
        }

        let response = response.error_for_status().map_err(transport)?;
        response
            .json::<R>()
            .await
            .map_err(|e| CoreError::Protocol(e.to_string()))
    }

    async fn update(&self, changes: &HashMap<String, String>) -> Result<BatchStatus, CoreError> {
        log::debug!("submitting {} amount changes to {}", changes.len(), self.url);
        let response = self
            .client
            .put(&self.url)
            .json(changes)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        response
            .json::<BatchStatus>()
            .await
            .map_err(|e| CoreError::Protocol(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<BatchStatus, CoreError> {
        let mut body = HashMap::new();
        body.insert("id", id);
        let response = self
            .client
            .delete(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        response
            .json::<BatchStatus>()
            .await
            .map_err(|e| CoreError::Protocol(e.to_string()))
    }
}
