//! Core data models for the two ledgers
//!
//! Records travel with camelCase field names and a store-assigned `_id`.
//! Business fields are text in transit; amounts are parsed to numbers only
//! for arithmetic. Timestamps are set by the API layer, never by clients.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inline message for a create payload with a missing or empty field
pub const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required.";

/// Inline message for a transaction date that is not a real MM/DD/YYYY date
pub const INVALID_DATE_MESSAGE: &str = "Please enter valid date mm/dd/yyyy";

/// A record in one of the two ledgers
///
/// Implemented by [`AccountRecord`] and [`TransactionRecord`]; everything
/// the aggregation core needs to group, total, render and reconcile a
/// collection without knowing which ledger it is working on.
pub trait LedgerRecord: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Create payload type for this ledger
    type Draft: LedgerDraft;

    /// Singular noun for user-facing messages ("account", "transaction")
    const NOUN: &'static str;
    /// Message displayed when the collection is empty
    const EMPTY_MESSAGE: &'static str;
    /// Table caption for ungrouped ledgers
    const CAPTION: &'static str;
    /// Column headings in display order (amount last)
    const COLUMNS: &'static [&'static str];
    /// Whether records group into one table per category
    const GROUPED: bool;
    /// API path for this ledger's collection
    const PATH: &'static str;
    /// Required business fields on a create payload, in wire naming
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Store-assigned identifier
    fn id(&self) -> &str;
    /// Raw stored amount text
    fn amount(&self) -> &str;
    /// User-entered grouping label, original casing
    fn category(&self) -> &str;
    /// Display cells in column order
    fn cells(&self) -> Vec<String>;
}

/// A client-side create payload, validated before it may be submitted
pub trait LedgerDraft: Serialize + Send + Sync {
    /// Check the payload; `Err` carries the inline message to display
    fn validate(&self) -> Result<(), String>;
}

// ==================== Accounts ====================

/// A stored account: a balance grouped by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub institution: String,
    pub account_type: String,
    pub amount: String,
    pub category: String,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// Create payload for an account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
    pub institution: String,
    pub account_type: String,
    pub amount: String,
    pub category: String,
}

impl LedgerRecord for AccountRecord {
    type Draft = AccountDraft;

    const NOUN: &'static str = "account";
    const EMPTY_MESSAGE: &'static str = "No accounts exist.";
    const CAPTION: &'static str = "Accounts";
    const COLUMNS: &'static [&'static str] = &["Institution", "Account Type", "Amount"];
    const GROUPED: bool = true;
    const PATH: &'static str = "accounts";
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["institution", "accountType", "amount", "category"];

    fn id(&self) -> &str {
        &self.id
    }

    fn amount(&self) -> &str {
        &self.amount
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.institution.clone(),
            self.account_type.clone(),
            self.amount.clone(),
        ]
    }
}

impl LedgerDraft for AccountDraft {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            &self.institution,
            &self.account_type,
            &self.amount,
            &self.category,
        ];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(REQUIRED_FIELDS_MESSAGE.to_string());
        }
        Ok(())
    }
}

// ==================== Transactions ====================

/// A stored transaction: a dated ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub transaction_date: String,
    pub category: String,
    pub vendor: String,
    pub description: String,
    pub amount: String,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// Create payload for a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub transaction_date: String,
    pub category: String,
    pub vendor: String,
    pub description: String,
    pub amount: String,
}

impl LedgerRecord for TransactionRecord {
    type Draft = TransactionDraft;

    const NOUN: &'static str = "transaction";
    const EMPTY_MESSAGE: &'static str = "No transactions exist.";
    const CAPTION: &'static str = "Transactions";
    const COLUMNS: &'static [&'static str] = &[
        "Transaction Date",
        "Category",
        "Vendor",
        "Description",
        "Amount",
    ];
    const GROUPED: bool = false;
    const PATH: &'static str = "transactions";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "transactionDate",
        "category",
        "vendor",
        "description",
        "amount",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn amount(&self) -> &str {
        &self.amount
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.transaction_date.clone(),
            self.category.clone(),
            self.vendor.clone(),
            self.description.clone(),
            self.amount.clone(),
        ]
    }
}

impl LedgerDraft for TransactionDraft {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            &self.transaction_date,
            &self.category,
            &self.vendor,
            &self.description,
            &self.amount,
        ];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(REQUIRED_FIELDS_MESSAGE.to_string());
        }
        if !is_valid_entry_date(&self.transaction_date) {
            return Err(INVALID_DATE_MESSAGE.to_string());
        }
        Ok(())
    }
}

// ==================== Date Validation ====================

static ENTRY_DATE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("entry date pattern is valid")
});

/// Strict MM/DD/YYYY check: two-digit month and day, and a real calendar
/// date. `13/40/2020` and `2/3/2020` both fail; `02/29/2020` passes.
pub fn is_valid_entry_date(text: &str) -> bool {
    ENTRY_DATE_FORMAT.is_match(text)
        && NaiveDate::parse_from_str(text, "%m/%d/%Y").is_ok()
}

// ==================== Batch Status ====================

/// Aggregate outcome of a batch update or a delete
///
/// The API reports one flag for the whole call; a partial failure in the
/// middle of a batch is not distinguishable from full success or full
/// failure. Serializes as `{"successStatus": 200}` or
/// `{"failedStatus": 500}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_status: Option<u16>,
}

impl BatchStatus {
    /// The whole batch was applied
    pub fn success() -> Self {
        Self {
            success_status: Some(200),
            failed_status: None,
        }
    }

    /// At least one store call in the batch failed
    pub fn failure(status: u16) -> Self {
        Self {
            success_status: None,
            failed_status: Some(status),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed_status.is_none()
    }
}

// ==================== Field Text ====================

/// Render a JSON field the way the API stores it: strings pass through,
/// numbers and booleans render to text, anything else has no text form.
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account() -> AccountRecord {
        AccountRecord {
            id: "a1".to_string(),
            institution: "Chase".to_string(),
            account_type: "Checking".to_string(),
            amount: "100".to_string(),
            category: "Bank".to_string(),
            created_date: Utc::now(),
            last_modified_date: Utc::now(),
        }
    }

    #[test]
    fn test_account_wire_names() {
        let value = serde_json::to_value(account()).unwrap();
        assert_eq!(value["_id"], "a1");
        assert_eq!(value["accountType"], "Checking");
        assert!(value.get("createdDate").is_some());
        assert!(value.get("lastModifiedDate").is_some());
        assert!(value.get("account_type").is_none());
    }

    #[test]
    fn test_account_round_trip() {
        let original = account();
        let value = serde_json::to_value(&original).unwrap();
        let parsed: AccountRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_entry_date_validation() {
        assert!(is_valid_entry_date("02/03/2020"));
        assert!(is_valid_entry_date("02/29/2020"));
        assert!(is_valid_entry_date("12/31/1999"));
        assert!(!is_valid_entry_date("13/40/2020"));
        assert!(!is_valid_entry_date("02/29/2021"));
        assert!(!is_valid_entry_date("2/3/2020"));
        assert!(!is_valid_entry_date("02-03-2020"));
        assert!(!is_valid_entry_date("02/03/20"));
        assert!(!is_valid_entry_date(""));
    }

    #[test]
    fn test_account_draft_requires_all_fields() {
        let mut draft = AccountDraft {
            institution: "Chase".to_string(),
            account_type: "Checking".to_string(),
            amount: "100".to_string(),
            category: "Bank".to_string(),
        };
        assert!(draft.validate().is_ok());

        draft.amount = "   ".to_string();
        assert_eq!(draft.validate(), Err(REQUIRED_FIELDS_MESSAGE.to_string()));
    }

    #[test]
    fn test_transaction_draft_checks_date_after_presence() {
        let draft = TransactionDraft {
            transaction_date: "13/40/2020".to_string(),
            category: "Food".to_string(),
            vendor: "Market".to_string(),
            description: "Groceries".to_string(),
            amount: "12.50".to_string(),
        };
        assert_eq!(draft.validate(), Err(INVALID_DATE_MESSAGE.to_string()));

        let empty = TransactionDraft::default();
        assert_eq!(empty.validate(), Err(REQUIRED_FIELDS_MESSAGE.to_string()));
    }

    #[test]
    fn test_batch_status_wire_shape() {
        let success = serde_json::to_value(BatchStatus::success()).unwrap();
        assert_eq!(success, json!({"successStatus": 200}));

        let failure = serde_json::to_value(BatchStatus::failure(500)).unwrap();
        assert_eq!(failure, json!({"failedStatus": 500}));

        assert!(BatchStatus::success().is_success());
        assert!(!BatchStatus::failure(500).is_success());
    }

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(&json!("100")), Some("100".to_string()));
        assert_eq!(field_text(&json!(100)), Some("100".to_string()));
        assert_eq!(field_text(&json!(12.5)), Some("12.5".to_string()));
        assert_eq!(field_text(&json!(null)), None);
        assert_eq!(field_text(&json!({})), None);
    }
}
