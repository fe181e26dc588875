//! Error types for cashflow-core

use thiserror::Error;

use crate::session::Phase;

/// Errors surfaced by the ledger core
#[derive(Debug, Error)]
pub enum CoreError {
    /// A create payload failed validation. Surfaced inline, never submitted.
    #[error("{message}")]
    Validation { message: String },

    /// An operation was invoked outside the phase that allows it
    #[error("Operation requires the {expected} phase, session is {actual}")]
    Phase { expected: Phase, actual: Phase },

    /// The transport to the ledger API failed. The original left these
    /// unmodeled; here they propagate to the caller via `?`.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The API responded with a body the client could not interpret
    #[error("Unexpected response: {0}")]
    Protocol(String),
}
