//! Ledger session: the screen-load state machine
//!
//! A [`LedgerSession`] owns the in-memory snapshot of one collection and
//! the view derived from it, and translates user commands (load, edit,
//! save, delete, add) into service calls. It replaces the module-scope
//! maps and per-button callbacks of earlier client revisions with one
//! explicit state object the presentation shell drives.
//!
//! The snapshot is a disposable cache: save and delete always re-fetch
//! from the server before acting, so no snapshot is assumed fresh across
//! page actions.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::CoreError;
use crate::models::{LedgerDraft, LedgerRecord};
use crate::service::LedgerService;
use crate::view::{build_view, format_amount, LedgerView};

/// How long a status banner stays visible before the shell dismisses it
pub const BANNER_DISMISS: Duration = Duration::from_secs(3);

/// Outcome flavor of a status banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Failure,
}

/// A transient status message shown after a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    fn success(message: String) -> Self {
        Self {
            kind: BannerKind::Success,
            message,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            kind: BannerKind::Failure,
            message,
        }
    }
}

/// Session phases. Reconciling and deleting happen inside [`LedgerSession::save`]
/// and [`LedgerSession::delete`] and end back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initial fetch in progress (or not started yet)
    Loading,
    /// Displaying the current view, awaiting a command
    Idle,
    /// Amount cells replaced by editable fields
    Editing,
    /// Entry form shown instead of the tables
    Adding,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Loading => write!(f, "loading"),
            Phase::Idle => write!(f, "idle"),
            Phase::Editing => write!(f, "editing"),
            Phase::Adding => write!(f, "adding"),
        }
    }
}

/// One editable row handed to the shell when editing begins
#[derive(Debug, Clone, PartialEq)]
pub struct EditRow {
    /// Record id this row edits
    pub id: String,
    /// Two-decimal formatted current amount, seeding the input field
    pub seeded_amount: String,
}

/// A typed-in amount for one row, as collected by the shell
#[derive(Debug, Clone, PartialEq)]
pub struct AmountEdit {
    pub id: String,
    pub value: String,
}

/// Result of a save: what was submitted and what banner (if any) to show
#[derive(Debug)]
pub struct SaveOutcome {
    /// The update payload that went to the server, possibly empty
    pub submitted: HashMap<String, String>,
    /// None when the edit session produced zero actual changes
    pub banner: Option<Banner>,
}

/// Result of submitting the entry form
#[derive(Debug, PartialEq)]
pub enum CreateOutcome {
    /// The record was created and the view reloaded
    Created,
    /// Client-side validation failed; nothing was submitted
    Invalid { message: String },
}

/// Compute the minimal update payload from typed values and a fresh fetch
///
/// Comparison is value equality on the raw stored string, not numeric:
/// a typed "100.00" against a stored "100" counts as a change. Rows whose
/// id no longer exists in the fresh snapshot (deleted by another session
/// mid-edit) are skipped.
pub fn reconcile<R: LedgerRecord>(edits: &[AmountEdit], fresh: &[R]) -> HashMap<String, String> {
    let mut changes = HashMap::new();
    for edit in edits {
        let Some(record) = fresh.iter().find(|record| record.id() == edit.id) else {
            continue;
        };
        if record.amount() != edit.value {
            changes.insert(edit.id.clone(), edit.value.clone());
        }
    }
    changes
}

/// Session-scoped state for one ledger screen
pub struct LedgerSession<R: LedgerRecord, S: LedgerService<R>> {
    service: S,
    phase: Phase,
    snapshot: Vec<R>,
    view: LedgerView,
}

impl<R: LedgerRecord, S: LedgerService<R>> LedgerSession<R, S> {
    /// Create a session that has not loaded yet
    pub fn new(service: S) -> Self {
        Self {
            service,
            phase: Phase::Loading,
            snapshot: Vec::new(),
            view: LedgerView::unloaded(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current derived view
    pub fn view(&self) -> &LedgerView {
        &self.view
    }

    /// Look up a record in the current snapshot
    pub fn record(&self, id: &str) -> Option<&R> {
        self.snapshot.iter().find(|record| record.id() == id)
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), CoreError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(CoreError::Phase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Fetch the full collection and rebuild the snapshot and view
    pub async fn load(&mut self) -> Result<&LedgerView, CoreError> {
        self.phase = Phase::Loading;
        self.snapshot = self.service.list().await?;
        self.view = build_view(&self.snapshot);
        self.phase = Phase::Idle;
        log::debug!("loaded {} {}s", self.snapshot.len(), R::NOUN);
        Ok(&self.view)
    }

    /// Switch to editing: one editable row per rendered row, each seeded
    /// with the two-decimal formatted current amount
    pub fn begin_edit(&mut self) -> Result<Vec<EditRow>, CoreError> {
        self.expect_phase(Phase::Idle)?;
        let rows = self
            .snapshot
            .iter()
            .map(|record| EditRow {
                id: record.id().to_string(),
                seeded_amount: format_amount(record.amount()),
            })
            .collect();
        self.phase = Phase::Editing;
        Ok(rows)
    }

    /// Save the edit session: re-fetch, diff, submit, reload
    ///
    /// The Idle-time snapshot is stale by design (other sessions may have
    /// written since), so the diff runs against a fresh fetch. The update
    /// payload goes to the server even when empty; the banner is produced
    /// only when it was not.
    pub async fn save(&mut self, edits: &[AmountEdit]) -> Result<SaveOutcome, CoreError> {
        self.expect_phase(Phase::Editing)?;

        let fresh = self.service.list().await?;
        let changes = reconcile(edits, &fresh);
        let status = self.service.update(&changes).await?;

        self.load().await?;

        let banner = if changes.is_empty() {
            None
        } else if status.is_success() {
            Some(Banner::success(format!("Updated {}s successfully.", R::NOUN)))
        } else {
            Some(Banner::failure(format!("Failed to update {}s.", R::NOUN)))
        };

        Ok(SaveOutcome {
            submitted: changes,
            banner,
        })
    }

    /// Delete one record immediately, independent of in-flight edits on
    /// other rows. The shell asks for confirmation before calling this.
    pub async fn delete(&mut self, id: &str) -> Result<Banner, CoreError> {
        self.expect_phase(Phase::Editing)?;

        let status = self.service.delete(id).await?;
        self.load().await?;

        Ok(if status.is_success() {
            Banner::success(format!("Deleted {} successfully.", R::NOUN))
        } else {
            Banner::failure(format!("Failed to delete {}.", R::NOUN))
        })
    }

    /// Replace the view with the entry form
    pub fn begin_add(&mut self) -> Result<(), CoreError> {
        self.expect_phase(Phase::Idle)?;
        self.phase = Phase::Adding;
        Ok(())
    }

    /// Submit the entry form. Validation failures stay on the form with an
    /// inline message and never reach the server.
    pub async fn submit_add(&mut self, draft: &R::Draft) -> Result<CreateOutcome, CoreError> {
        self.expect_phase(Phase::Adding)?;

        if let Err(message) = draft.validate() {
            return Ok(CreateOutcome::Invalid { message });
        }

        self.service.create(draft).await?;
        self.load().await?;
        Ok(CreateOutcome::Created)
    }
}

// ==================== Tests ====================
