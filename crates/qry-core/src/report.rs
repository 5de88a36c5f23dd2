//! Serializable error snapshots for tooling and JSON output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::info::InputInfo;
use crate::query_error::QueryError;
use crate::text::MessageText;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorReport {
    /// Error name in display form, e.g. `err:XPST0003`.
    pub code: String,
    pub namespace: String,
    /// Message without position or trace.
    pub message: String,
    /// Full rendered message.
    pub rendered: String,
    pub line: u32,
    pub column: u32,
    pub file: Option<String>,
    pub marked_column: usize,
    pub suggestions: Vec<String>,
    pub trace: Vec<InputInfo>,
    pub catchable: bool,
    pub value: Value,
}

impl ErrorReport {
    #[must_use]
    pub fn from_error(error: &QueryError, text: &MessageText) -> Self {
        Self {
            code: error.name().to_string(),
            namespace: error.name().uri().to_owned(),
            message: error.message().to_owned(),
            rendered: error.render_with(text),
            line: error.line(),
            column: error.column(),
            file: error.file().map(str::to_owned),
            marked_column: error.marked_column(),
            suggestions: error.suggestions().to_vec(),
            trace: error.trace().to_vec(),
            catchable: error.is_catchable(),
            value: error.value().clone(),
        }
    }
}
