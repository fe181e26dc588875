//! HTTP API server for the cashflow ledgers
//!
//! Routes are organized into modules:
//! - routes::accounts: list, create, batch update, delete
//! - routes::transactions: same shape, different fields
//!
//! Stateless handlers mapping CRUD verbs onto the document store with
//! minimal shaping: presence validation on create, stringified business
//! fields, server-stamped timestamps. No auth, no rate limiting, no
//! idempotency keys; repeated deletes of the same id report success.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use cashflow_config::Config;
use cashflow_store::DocumentStore;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{create_account, delete_account, list_accounts, update_accounts};
    use routes::transactions::{
        create_transaction, delete_transaction, list_transactions, update_transactions,
    };

    Router::new()
        .route("/", get(greeting))
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts", put(update_accounts))
        .route("/accounts", delete(delete_account))
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions", put(update_transactions))
        .route("/transactions", delete(delete_transaction))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root greeting, doubles as a health check
async fn greeting() -> Json<serde_json::Value> {
    Json(json!({ "message": "Meower!" }))
}

/// Start the HTTP server
///
/// Creates the router, binds to the configured address, and serves until
/// the process is stopped.
pub async fn start_server(config: Config, store: Arc<dyn DocumentStore>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { store, config };

    let router = create_router(state);

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("[ERROR] Could not bind {}: {}", addr, e);
            return;
        }
    };
    eprintln!("[INFO] Listening on http://{}", addr);
    eprintln!("[INFO] Available routes:");
    eprintln!("[INFO]   - /accounts (GET, POST, PUT, DELETE)");
    eprintln!("[INFO]   - /transactions (GET, POST, PUT, DELETE)");

    match axum::serve(listener, router).await {
        Ok(_) => eprintln!("[INFO] Server stopped gracefully"),
        Err(e) => eprintln!("[ERROR] Server error: {}", e),
    }
}
