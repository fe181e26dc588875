//! In-process tests for the ledger API, driving the router directly

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use cashflow_api::{create_router, AppState};
use cashflow_config::Config;
use cashflow_store::MemoryStore;

fn app() -> Router {
    create_router(AppState {
        store: Arc::new(MemoryStore::new("cashflow")),
        config: Config::default(),
    })
}

async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn chase_account() -> Value {
    json!({
        "institution": "Chase",
        "accountType": "Checking",
        "amount": "100",
        "category": "Bank"
    })
}

#[tokio::test]
async fn greeting_responds() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Meower!");
}

#[tokio::test]
async fn empty_collections_list_as_empty_arrays() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, body) = send(&app, Method::GET, "/transactions", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_returns_stored_record_with_id_and_timestamps() {
    let app = app();
    let (status, created) = send(&app, Method::POST, "/accounts", Some(chase_account())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(created["_id"].is_string());
    assert_eq!(created["institution"], "Chase");
    assert_eq!(created["accountType"], "Checking");
    assert_eq!(created["amount"], "100");
    assert_eq!(created["category"], "Bank");
    assert_eq!(created["createdDate"], created["lastModifiedDate"]);

    let (_, listed) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0], created);
}

#[tokio::test]
async fn create_stringifies_numeric_fields() {
    let app = app();
    let payload = json!({
        "institution": "Chase",
        "accountType": "Checking",
        "amount": 100.5,
        "category": "Bank"
    });
    let (status, created) = send(&app, Method::POST, "/accounts", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["amount"], "100.5");
}

#[tokio::test]
async fn create_rejects_missing_or_blank_fields() {
    let app = app();

    let mut missing = chase_account();
    missing.as_object_mut().unwrap().remove("category");
    let (status, body) = send(&app, Method::POST, "/accounts", Some(missing)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "All fields are required.");

    let mut blank = chase_account();
    blank["institution"] = json!("   ");
    let (status, _) = send(&app, Method::POST, "/accounts", Some(blank)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, listed) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn update_sets_amount_and_refreshes_modified_date() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/accounts", Some(chase_account())).await;
    let id = created["_id"].as_str().unwrap().to_string();
    let before = created["lastModifiedDate"].as_str().unwrap().to_string();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/accounts",
        Some(json!({ id.clone(): "250.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "successStatus": 200 }));

    let (_, listed) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(listed[0]["amount"], "250.00");
    let before: chrono::DateTime<chrono::Utc> = before.parse().unwrap();
    let after: chrono::DateTime<chrono::Utc> =
        listed[0]["lastModifiedDate"].as_str().unwrap().parse().unwrap();
    assert!(after > before, "{} should be after {}", after, before);
    assert_eq!(listed[0]["createdDate"], created["createdDate"]);
}

#[tokio::test]
async fn update_of_absent_id_is_a_silent_success() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/accounts",
        Some(json!({ "no-such-id": "1.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "successStatus": 200 }));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/accounts", Some(chase_account())).await;
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/accounts",
        Some(json!({ "id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "successStatus": 200 }));

    let (_, listed) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(listed, json!([]));

    // Deleting the already-deleted id reports the same success
    let (status, body) = send(
        &app,
        Method::DELETE,
        "/accounts",
        Some(json!({ "id": created["_id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "successStatus": 200 }));
}

#[tokio::test]
async fn server_accepts_any_transaction_date() {
    // Date format is a client-side concern; the API only checks presence
    let app = app();
    let payload = json!({
        "transactionDate": "13/40/2020",
        "category": "Food",
        "vendor": "Market",
        "description": "Groceries",
        "amount": "12.50"
    });
    let (status, created) = send(&app, Method::POST, "/transactions", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["transactionDate"], "13/40/2020");
}

#[tokio::test]
async fn transactions_have_their_own_collection() {
    let app = app();
    let payload = json!({
        "transactionDate": "01/15/2020",
        "category": "Food",
        "vendor": "Market",
        "description": "Groceries",
        "amount": "12.50"
    });
    send(&app, Method::POST, "/transactions", Some(payload)).await;

    let (_, accounts) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(accounts, json!([]));
    let (_, transactions) = send(&app, Method::GET, "/transactions", None).await;
    assert_eq!(transactions.as_array().unwrap().len(), 1);
}
