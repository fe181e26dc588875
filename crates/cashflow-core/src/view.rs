//! View derivation: grouping, totals and table construction
//!
//! Everything here is recomputed from the full snapshot on every call.
//! Totals are a full re-sum, never an incremental adjustment carried over
//! from a previous display.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::LedgerRecord;

/// Parse a stored amount for arithmetic. Unparsable text counts as zero.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Two-decimal display form of a stored amount
pub fn format_amount(raw: &str) -> String {
    format!("{:.2}", parse_amount(raw))
}

/// Per-category totals keyed by the lower-cased category name
pub fn category_totals<R: LedgerRecord>(records: &[R]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for record in records {
        *totals.entry(record.category().to_lowercase()).or_insert(0.0) +=
            parse_amount(record.amount());
    }
    totals
}

/// Distinct categories in first-occurrence order
///
/// Deduplication is case-insensitive; the returned caption keeps the
/// casing of the first record seen in each category.
pub fn distinct_categories<R: LedgerRecord>(records: &[R]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    for record in records {
        if seen.insert(record.category().to_lowercase()) {
            categories.push(record.category().to_string());
        }
    }
    categories
}

/// A rendered row carrying its record id explicitly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    /// Store identifier of the record behind this row
    pub id: String,
    /// Display cells in column order
    pub cells: Vec<String>,
}

/// One displayed table with its caption and total row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Caption: the category (original casing) or the ledger caption
    pub caption: String,
    /// Column headings
    pub columns: &'static [&'static str],
    /// Rows in snapshot iteration order
    pub rows: Vec<RowView>,
    /// Two-decimal total of the rows' amounts
    pub total: String,
}

/// The derived view of a whole collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerView {
    /// One table per category, or a single flat table
    pub tables: Vec<TableView>,
    /// Set when the collection is empty; no tables are built then
    pub empty_message: Option<&'static str>,
}

impl LedgerView {
    /// View of a collection that has not been loaded yet
    pub fn unloaded() -> Self {
        Self {
            tables: Vec::new(),
            empty_message: None,
        }
    }
}

fn row_view<R: LedgerRecord>(record: &R) -> RowView {
    RowView {
        id: record.id().to_string(),
        cells: record.cells(),
    }
}

/// Build the displayed view from a full snapshot
pub fn build_view<R: LedgerRecord>(records: &[R]) -> LedgerView {
    if records.is_empty() {
        return LedgerView {
            tables: Vec::new(),
            empty_message: Some(R::EMPTY_MESSAGE),
        };
    }

    let tables = if R::GROUPED {
        let totals = category_totals(records);
        distinct_categories(records)
            .into_iter()
            .map(|caption| {
                let key = caption.to_lowercase();
                let rows = records
                    .iter()
                    .filter(|record| record.category().to_lowercase() == key)
                    .map(row_view)
                    .collect();
                let total = totals.get(&key).copied().unwrap_or(0.0);
                TableView {
                    caption,
                    columns: R::COLUMNS,
                    rows,
                    total: format!("{:.2}", total),
                }
            })
            .collect()
    } else {
        let total: f64 = records
            .iter()
            .map(|record| parse_amount(record.amount()))
            .sum();
        vec![TableView {
            caption: R::CAPTION.to_string(),
            columns: R::COLUMNS,
            rows: records.iter().map(row_view).collect(),
            total: format!("{:.2}", total),
        }]
    };

    LedgerView {
        tables,
        empty_message: None,
    }
}

// ==================== Tests ====================
