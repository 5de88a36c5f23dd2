//! Errors raised by the error model itself.
//!
//! These are programmer-facing failures (bad catalog lookups, illegal latch
//! transitions, malformed name tests). Query failures are [`QueryError`]s.
//!
//! [`QueryError`]: crate::QueryError

use thiserror::Error;

use crate::enums::Catchability;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A latch transition was attempted that is not allowed.
    #[error("Invalid catchability transition from {from} to {to}")]
    InvalidTransition { from: Catchability, to: Catchability },

    /// No catalog entry has the given code.
    #[error("Unknown error code: {0}")]
    UnknownCode(String),

    /// A catch name test could not be parsed.
    #[error("Invalid name test '{test}': {reason}")]
    InvalidNameTest { test: String, reason: String },
}
