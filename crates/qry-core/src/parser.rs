//! Parser cursor contract used to position errors raised mid-scan.
//!
//! Errors raised during tokenization lookahead often do not yet know their
//! final location. [`QueryError::mark_position`](crate::QueryError::mark_position)
//! asks the parser for its tentative scan offset instead.

use crate::info::InputInfo;

/// Read-only view of a parser's scan state.
pub trait InputParser {
    /// Current tentative scan offset, in bytes.
    fn mark(&self) -> usize;

    /// Total input length, in bytes.
    fn length(&self) -> usize;

    /// Resolve a byte offset into a line/column position.
    fn info_at(&self, offset: usize) -> InputInfo;
}

/// Cursor over an in-memory query string.
#[derive(Debug, Clone)]
pub struct StringParser {
    input: String,
    file: Option<String>,
    /// Tentative scan offset; may run past the end of the input.
    mark: usize,
}

impl StringParser {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            file: None,
            mark: 0,
        }
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Move the tentative mark. Offsets past the end are allowed; consumers
    /// clamp them against [`InputParser::length`].
    pub const fn set_mark(&mut self, offset: usize) {
        self.mark = offset;
    }
}

impl InputParser for StringParser {
    fn mark(&self) -> usize {
        self.mark
    }

    fn length(&self) -> usize {
        self.input.len()
    }

    fn info_at(&self, offset: usize) -> InputInfo {
        let mut line = 1u32;
        let mut column = 1u32;
        for (index, ch) in self.input.char_indices() {
            if index >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        InputInfo {
            file: self.file.clone(),
            line,
            column,
        }
    }
}
