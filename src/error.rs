//! Error types for the text editing core.
//!
//! Buffer primitives never fail: they either change the buffer or report
//! that nothing happened. Only replaying an [`EditRecord`] can fail, because
//! the record re-targets a row and column that the type system cannot keep
//! valid across arbitrary undo stack misuse.
//!
//! [`EditRecord`]: crate::text::EditRecord

use thiserror::Error;

/// Result type alias for text core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for text core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An edit record was replayed against a buffer whose structure no
    /// longer matches what the record expects, or in the wrong state.
    #[error("invariant violation replaying {record}: {detail}")]
    InvariantViolation {
        /// Name of the record variant being replayed.
        record: &'static str,
        /// What did not match.
        detail: String,
    },
}

impl Error {
    pub(crate) fn invariant(record: &'static str, detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            record,
            detail: detail.into(),
        }
    }

    /// Whether this error signals a misused or corrupted undo journal.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}
