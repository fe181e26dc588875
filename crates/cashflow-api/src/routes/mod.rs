//! Route handlers for the two ledger collections
//!
//! `/accounts` and `/transactions` expose the same four operations; the
//! shared shaping lives here and the thin per-collection handlers in their
//! own modules. The API performs presence/non-empty validation on create,
//! stringifies business fields, stamps timestamps, and otherwise passes
//! documents through verbatim.

pub mod accounts;
pub mod transactions;

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use cashflow_core::{field_text, BatchStatus, REQUIRED_FIELDS_MESSAGE};

use crate::error::ApiError;
use crate::AppState;

/// Delete request body: `{"id": "..."}`
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

/// GET: every record in the collection verbatim, store natural order
pub(crate) async fn list_collection(
    state: &AppState,
    collection: &str,
) -> Result<Json<Vec<Value>>, ApiError> {
    let records = state.store.find_all(collection).await?;
    log::info!("listed {} records from {}", records.len(), collection);
    Ok(Json(records))
}

/// POST: validate, stringify, stamp timestamps, insert
///
/// Every required business field must be present and non-empty after
/// trimming, otherwise 422 with an inline message. Both timestamps come
/// from a single clock reading, so `createdDate == lastModifiedDate` on
/// the stored record.
pub(crate) async fn create_record(
    state: &AppState,
    collection: &str,
    required: &[&str],
    body: Value,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut document = Map::new();
    for field in required {
        let text = body
            .get(*field)
            .and_then(field_text)
            .filter(|text| !text.trim().is_empty());
        match text {
            Some(text) => {
                document.insert((*field).to_string(), Value::String(text));
            }
            None => {
                log::warn!("rejected {} create: {} missing or empty", collection, field);
                return Ok((
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "message": REQUIRED_FIELDS_MESSAGE })),
                ));
            }
        }
    }

    // One clock reading, so createdDate == lastModifiedDate at creation
    let now = json!(Utc::now());
    document.insert("createdDate".to_string(), now.clone());
    document.insert("lastModifiedDate".to_string(), now);

    let stored = state.store.insert(collection, Value::Object(document)).await?;
    log::info!(
        "inserted into {}: {}",
        collection,
        cashflow_store::document_id(&stored).unwrap_or("<no id>")
    );
    Ok((StatusCode::OK, Json(stored)))
}

/// PUT: apply a batch of id-to-amount changes
///
/// Each entry sets the stringified amount and refreshes
/// `lastModifiedDate`. Absent ids are silent no-ops at the store level.
/// The response is one aggregate flag for the whole batch; if any store
/// call fails the batch reports failure, with no per-item detail.
pub(crate) async fn update_collection(
    state: &AppState,
    collection: &str,
    changes: HashMap<String, Value>,
) -> Json<BatchStatus> {
    let mut failed = false;
    for (id, amount) in &changes {
        let amount_text = field_text(amount).unwrap_or_else(|| amount.to_string());
        let now = json!(Utc::now());

        let mut fields = Map::new();
        fields.insert("amount".to_string(), Value::String(amount_text));
        fields.insert("lastModifiedDate".to_string(), now);

        match state.store.set_fields(collection, id, fields).await {
            Ok(()) => log::info!("{} id {} was successfully updated", collection, id),
            Err(e) => {
                log::error!("{} id {} update failed: {}", collection, id, e);
                failed = true;
            }
        }
    }

    if failed {
        log::error!("{} batch update reported failure", collection);
        Json(BatchStatus::failure(500))
    } else {
        log::info!("{} batch update succeeded ({} entries)", collection, changes.len());
        Json(BatchStatus::success())
    }
}

/// DELETE: remove by id; an absent id still reports success
pub(crate) async fn delete_record(
    state: &AppState,
    collection: &str,
    id: &str,
) -> Json<BatchStatus> {
    match state.store.remove(collection, id).await {
        Ok(()) => {
            log::info!("{} id {} deleted", collection, id);
            Json(BatchStatus::success())
        }
        Err(e) => {
            log::error!("{} id {} delete failed: {}", collection, id, e);
            Json(BatchStatus::failure(500))
        }
    }
}
