//! Small state enums used by the error model.
//!
//! [`Catchability`] is a one-way latch: an error may become uncatchable but
//! never catchable again. [`LineBreak`] selects the separator used when
//! rendering messages.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Catchability
// ---------------------------------------------------------------------------

/// Whether catch clauses may intercept an error.
///
/// ```text
/// catchable → uncatchable
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Catchability {
    #[default]
    Catchable,
    Uncatchable,
}

impl Catchability {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Catchable => &[Self::Uncatchable],
            Self::Uncatchable => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Move to `next`. Staying in the current state is always allowed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] for `uncatchable → catchable`.
    pub fn transition_to(self, next: Self) -> Result<Self, CoreError> {
        if self == next || self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    #[must_use]
    pub const fn is_catchable(self) -> bool {
        matches!(self, Self::Catchable)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Catchable => "catchable",
            Self::Uncatchable => "uncatchable",
        }
    }
}

impl fmt::Display for Catchability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LineBreak
// ---------------------------------------------------------------------------

/// Line separator used in rendered messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineBreak {
    /// `\r\n` on Windows, `\n` elsewhere.
    #[default]
    Platform,
    Lf,
    CrLf,
}

impl LineBreak {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Platform => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}
