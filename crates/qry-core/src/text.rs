//! User-facing text fragments used when rendering error messages.

use serde::{Deserialize, Serialize};

use crate::enums::LineBreak;

fn default_stopped_at() -> String {
    String::from("Stopped at ")
}

fn default_stack_trace() -> String {
    String::from("Stack Trace")
}

fn default_col() -> String {
    String::from(":")
}

fn default_li() -> String {
    String::from("- ")
}

/// Localizable fragments of a rendered [`QueryError`](crate::QueryError).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageText {
    /// Prefix of the position line.
    #[serde(default = "default_stopped_at")]
    pub stopped_at: String,

    /// Header of the trace block.
    #[serde(default = "default_stack_trace")]
    pub stack_trace: String,

    /// Separator appended to the position line and the trace header.
    #[serde(default = "default_col")]
    pub col: String,

    /// Bullet in front of each trace entry.
    #[serde(default = "default_li")]
    pub li: String,

    #[serde(default)]
    pub line_break: LineBreak,
}

impl Default for MessageText {
    fn default() -> Self {
        Self {
            stopped_at: default_stopped_at(),
            stack_trace: default_stack_trace(),
            col: default_col(),
            li: default_li(),
            line_break: LineBreak::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let text = MessageText::default();
        assert_eq!(text.stopped_at, "Stopped at ");
        assert_eq!(text.stack_trace, "Stack Trace");
        assert_eq!(text.col, ":");
        assert_eq!(text.li, "- ");
        assert_eq!(text.line_break, LineBreak::Platform);
    }

    #[test]
    fn partial_documents_fill_defaults() {
        let text: MessageText =
            serde_json::from_str(r#"{"stopped_at": "Arrêté à ", "line_break": "lf"}"#).unwrap();
        assert_eq!(text.stopped_at, "Arrêté à ");
        assert_eq!(text.stack_trace, "Stack Trace");
        assert_eq!(text.line_break, LineBreak::Lf);
    }
}
