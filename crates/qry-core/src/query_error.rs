//! The structured error raised while parsing or evaluating a query.
//!
//! A [`QueryError`] is created once where a failure is detected and then
//! travels up through `Result`s. Evaluation frames append their position to
//! the trace on the way out (see [`ResultExt::in_frame`](crate::ResultExt::in_frame)),
//! and the top level renders it with [`QueryError::render_message`].
//!
//! Rendered layout, each element separated by a line break:
//!
//! ```text
//! Stopped at <file>, <line>/<column>:
//! [<code>] <message>
//! Stack Trace:
//! - <entry>
//! - <entry>
//! ```
//!
//! The position line, the `[code] ` prefix and the trace block are omitted
//! when empty. Tools parse this layout, so it must stay stable.

use std::error::Error;
use std::fmt::{self, Write as _};

use crate::args::{ErrorArg, SharedFailure, format_template};
use crate::catalog::{ErrorDescriptor, ErrorKind};
use crate::enums::Catchability;
use crate::errors::CoreError;
use crate::info::InputInfo;
use crate::parser::InputParser;
use crate::qname::QName;
use crate::report::ErrorReport;
use crate::text::MessageText;
use crate::value::Value;

/// Result type for parsing and evaluation.
pub type QueryResult<T> = Result<T, QueryError>;

/// A failure raised while parsing or evaluating a query.
///
/// Carries the error name, the substituted message, an optional source
/// position, the propagation trace, a value for catch handlers, suggestions
/// and the catchability latch.
#[derive(Debug, Clone)]
pub struct QueryError {
    name: QName,
    message: String,
    err: Option<ErrorDescriptor>,
    info: Option<InputInfo>,
    marked_column: usize,
    trace: Vec<InputInfo>,
    value: Value,
    suggestions: Option<Vec<String>>,
    catchability: Catchability,
    cause: Option<SharedFailure>,
}

impl QueryError {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Generic error with a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_descriptor(None, ErrorKind::Generic, [ErrorArg::Text(message.into())])
    }

    /// Generic error wrapping an underlying failure, which becomes the cause.
    pub fn from_failure<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::with_descriptor(None, ErrorKind::Generic, [ErrorArg::failure(error)])
    }

    /// Error from a descriptor, substituting `args` into its template.
    ///
    /// The number and order of `args` must match the template placeholders.
    /// The first [`ErrorArg::Failure`] among them becomes the cause.
    pub fn with_descriptor(
        info: Option<InputInfo>,
        descriptor: impl Into<ErrorDescriptor>,
        args: impl IntoIterator<Item = ErrorArg>,
    ) -> Self {
        let descriptor = descriptor.into();
        let mut error = Self::with_name(
            info,
            descriptor.name().clone(),
            descriptor.template(),
            args,
        );
        error.err = Some(descriptor);
        error
    }

    /// Error from an explicit name and template, without a descriptor.
    pub fn with_name(
        info: Option<InputInfo>,
        name: QName,
        template: &str,
        args: impl IntoIterator<Item = ErrorArg>,
    ) -> Self {
        let args: Vec<ErrorArg> = args.into_iter().collect();
        let cause = args.iter().find_map(ErrorArg::as_failure).cloned();

        let mut error = Self {
            name,
            message: format_template(template, &args),
            err: None,
            info: None,
            marked_column: 0,
            trace: Vec::new(),
            value: Value::Empty,
            suggestions: None,
            catchability: Catchability::Catchable,
            cause,
        };
        if let Some(info) = info {
            error.set_position(info);
        }
        error
    }

    /// Error for a resource limit. Fatal kinds are raised uncatchable.
    pub fn limit(kind: ErrorKind, args: impl IntoIterator<Item = ErrorArg>) -> Self {
        let mut error = Self::with_descriptor(None, kind, args);
        if kind.is_fatal() {
            error.mark_uncatchable();
        }
        error
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn at(mut self, info: InputInfo) -> Self {
        self.set_position(info);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_err(mut self, err: ErrorDescriptor) -> Self {
        self.err = Some(err);
        self
    }

    #[must_use]
    pub fn uncatchable(mut self) -> Self {
        self.mark_uncatchable();
        self
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Install the position unless one is already set.
    pub fn set_position(&mut self, info: InputInfo) -> &mut Self {
        if self.info.is_none() {
            self.info = Some(info);
        }
        self
    }

    /// Record the parser's tentative offset as the marked column and, if no
    /// position is set yet, derive one from that offset clamped to the input.
    pub fn mark_position<P: InputParser + ?Sized>(&mut self, parser: &P) -> &mut Self {
        self.marked_column = parser.mark();
        if self.info.is_none() {
            let offset = parser.mark().min(parser.length());
            let info = parser.info_at(offset);
            tracing::trace!(code = %self.name, %info, "late-bound error position");
            self.info = Some(info);
        }
        self
    }

    /// Attach code suggestions and position the error at the parser's mark.
    pub fn suggest<P: InputParser + ?Sized>(
        &mut self,
        parser: &P,
        suggestions: Vec<String>,
    ) -> &mut Self {
        self.suggestions = Some(suggestions);
        self.mark_position(parser)
    }

    /// Append a propagation entry. `None` is ignored.
    pub fn add_trace(&mut self, info: Option<InputInfo>) -> &mut Self {
        if let Some(info) = info {
            self.trace.push(info);
        }
        self
    }

    pub fn set_value(&mut self, value: Value) -> &mut Self {
        self.value = value;
        self
    }

    pub fn set_err(&mut self, err: ErrorDescriptor) -> &mut Self {
        self.err = Some(err);
        self
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<String>) -> &mut Self {
        self.suggestions = Some(suggestions);
        self
    }

    /// Prevent catch clauses from intercepting this error. Irreversible.
    pub const fn mark_uncatchable(&mut self) -> &mut Self {
        self.catchability = Catchability::Uncatchable;
        self
    }

    /// Move the catchability latch.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] when trying to make an
    /// uncatchable error catchable again.
    pub fn set_catchability(&mut self, next: Catchability) -> Result<&mut Self, CoreError> {
        self.catchability = self.catchability.transition_to(next)?;
        Ok(self)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub const fn name(&self) -> &QName {
        &self.name
    }

    #[must_use]
    pub const fn err(&self) -> Option<&ErrorDescriptor> {
        self.err.as_ref()
    }

    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        self.err.as_ref().and_then(ErrorDescriptor::kind)
    }

    /// Message with extensions substituted, without position or trace.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Code suggestions; empty if none were set.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        self.suggestions.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub const fn info(&self) -> Option<&InputInfo> {
        self.info.as_ref()
    }

    /// Error line, or 0 without a position.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.info.as_ref().map_or(0, InputInfo::line)
    }

    /// Error column, or 0 without a position.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.info.as_ref().map_or(0, InputInfo::column)
    }

    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.info.as_ref().and_then(InputInfo::file)
    }

    /// Marked parser offset, or 0 if never marked.
    #[must_use]
    pub const fn marked_column(&self) -> usize {
        self.marked_column
    }

    #[must_use]
    pub fn trace(&self) -> &[InputInfo] {
        &self.trace
    }

    #[must_use]
    pub const fn catchability(&self) -> Catchability {
        self.catchability
    }

    #[must_use]
    pub const fn is_catchable(&self) -> bool {
        self.catchability.is_catchable()
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Full message with the default text fragments.
    #[must_use]
    pub fn render_message(&self) -> String {
        self.render_with(&MessageText::default())
    }

    /// Full message with the given text fragments.
    #[must_use]
    pub fn render_with(&self, text: &MessageText) -> String {
        let nl = text.line_break.as_str();
        let mut out = String::new();

        if let Some(info) = &self.info {
            let _ = write!(out, "{}{info}{}{nl}", text.stopped_at, text.col);
        }

        let code = self.name.local();
        if !code.is_empty() {
            let _ = write!(out, "[{code}] ");
        }

        out.push_str(&self.message);

        if !self.trace.is_empty() {
            let _ = write!(out, "{nl}{}{}", text.stack_trace, text.col);
            for entry in &self.trace {
                let _ = write!(out, "{nl}{}{entry}", text.li);
            }
        }

        out
    }

    /// Serializable snapshot for tooling.
    #[must_use]
    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error(self, &MessageText::default())
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_message())
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

impl From<std::io::Error> for QueryError {
    fn from(error: std::io::Error) -> Self {
        Self::from_failure(error)
    }
}
