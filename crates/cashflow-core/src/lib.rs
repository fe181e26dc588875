//! Ledger aggregation and edit-reconciliation
//!
//! The client-side core of cashflow: it keeps a re-derivable snapshot of
//! one server collection, derives grouping and totals for display, detects
//! user edits against a fresh fetch, and pushes only the changed fields
//! back to the API.
//!
//! Modules:
//! - [`models`]: account and transaction records, create drafts, wire types
//! - [`view`]: grouping, category totals and table construction
//! - [`session`]: the per-screen state machine and its command operations
//! - [`service`]: the transport-agnostic trait the session calls through

pub mod error;
pub mod models;
pub mod service;
pub mod session;
pub mod view;

pub use error::CoreError;
pub use models::{
    field_text, is_valid_entry_date, AccountDraft, AccountRecord, BatchStatus, LedgerDraft,
    LedgerRecord, TransactionDraft, TransactionRecord, INVALID_DATE_MESSAGE,
    REQUIRED_FIELDS_MESSAGE,
};
pub use service::LedgerService;
pub use session::{
    reconcile, AmountEdit, Banner, BannerKind, CreateOutcome, EditRow, LedgerSession, Phase,
    SaveOutcome, BANNER_DISMISS,
};
pub use view::{
    build_view, category_totals, distinct_categories, format_amount, parse_amount, LedgerView,
    RowView, TableView,
};
