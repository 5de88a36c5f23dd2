//! Source positions attached to errors and trace entries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line, column and originating file of an input location.
///
/// Lines and columns are 1-based. Displays as `file, line/column`, or
/// `line/column` when the input has no file identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct InputInfo {
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl InputInfo {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

impl fmt::Display for InputInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}, ")?;
        }
        write!(f, "{}/{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_file() {
        assert_eq!(InputInfo::new(4, 7).to_string(), "4/7");
    }

    #[test]
    fn display_with_file() {
        let info = InputInfo::new(12, 1).with_file("lib/util.xq");
        assert_eq!(info.to_string(), "lib/util.xq, 12/1");
        assert_eq!(info.file(), Some("lib/util.xq"));
    }
}
