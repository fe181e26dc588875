//! Handlers for the `/transactions` collection
//!
//! Same shape as `/accounts`. Note that `transactionDate` is only checked
//! for presence here; the strict calendar-date check is a client concern.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use cashflow_core::{BatchStatus, LedgerRecord, TransactionRecord};
use cashflow_store::TRANSACTIONS;

use super::DeleteRequest;
use crate::error::ApiError;
use crate::AppState;

pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Value>>, ApiError> {
    super::list_collection(&state, TRANSACTIONS).await
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    super::create_record(&state, TRANSACTIONS, TransactionRecord::REQUIRED_FIELDS, body).await
}

pub async fn update_transactions(
    State(state): State<AppState>,
    Json(changes): Json<HashMap<String, Value>>,
) -> Json<BatchStatus> {
    super::update_collection(&state, TRANSACTIONS, changes).await
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Json<BatchStatus> {
    super::delete_record(&state, TRANSACTIONS, &request.id).await
}
