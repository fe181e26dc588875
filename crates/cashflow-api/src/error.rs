//! Error types for cashflow-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors a handler can fail with
#[derive(Debug, Error)]
pub enum ApiError {
    /// The store rejected or failed an operation
    #[error("Store error: {0}")]
    Store(#[from] cashflow_store::StoreError),

    /// The request body was not what the endpoint expects
    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        };
        log::error!("request failed: {}", self);
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
