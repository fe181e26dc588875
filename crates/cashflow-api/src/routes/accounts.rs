//! Handlers for the `/accounts` collection

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use cashflow_core::{AccountRecord, BatchStatus, LedgerRecord};
use cashflow_store::ACCOUNTS;

use super::DeleteRequest;
use crate::error::ApiError;
use crate::AppState;

pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    super::list_collection(&state, ACCOUNTS).await
}

pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    super::create_record(&state, ACCOUNTS, AccountRecord::REQUIRED_FIELDS, body).await
}

pub async fn update_accounts(
    State(state): State<AppState>,
    Json(changes): Json<HashMap<String, Value>>,
) -> Json<BatchStatus> {
    super::update_collection(&state, ACCOUNTS, changes).await
}

pub async fn delete_account(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Json<BatchStatus> {
    super::delete_record(&state, ACCOUNTS, &request.id).await
}
