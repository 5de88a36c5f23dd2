//! Extension arguments and message template substitution.
//!
//! Templates use `%` for the next sequential argument and `%1`..`%9` for an
//! explicit (1-based) argument. A placeholder without a matching argument is
//! kept verbatim; callers are expected to pass exactly as many arguments as
//! the template has placeholders.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::info::InputInfo;
use crate::qname::QName;
use crate::value::{ExprInfo, Value};

/// Shared, thread-safe underlying failure.
pub type SharedFailure = Arc<dyn Error + Send + Sync + 'static>;

/// One argument substituted into an error message template.
#[derive(Debug, Clone)]
pub enum ErrorArg {
    Text(String),
    /// Raw bytes, decoded as UTF-8 (lossily) for display.
    Bytes(Vec<u8>),
    /// An expression already rendered through [`ExprInfo::to_bounded_string`].
    Expr(String),
    /// An underlying failure. The first one among the arguments becomes the
    /// error's cause.
    Failure(SharedFailure),
    /// Any other value, in its `Display` form.
    Display(String),
}

impl ErrorArg {
    /// Render an expression without a length bound.
    pub fn expr<E: ExprInfo + ?Sized>(expr: &E) -> Self {
        Self::Expr(expr.to_bounded_string(usize::MAX))
    }

    pub fn failure<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::Failure(Arc::new(error))
    }

    pub fn display(value: impl fmt::Display) -> Self {
        Self::Display(value.to_string())
    }

    /// Display string substituted into the template.
    #[must_use]
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) | Self::Expr(text) | Self::Display(text) => Cow::Borrowed(text),
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes),
            Self::Failure(error) => Cow::Owned(failure_message(&**error)),
        }
    }

    #[must_use]
    pub const fn as_failure(&self) -> Option<&SharedFailure> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }
}

/// Human-readable message of an arbitrary failure, falling back to its debug
/// form when the display form is empty.
pub fn failure_message<E: Error + ?Sized>(error: &E) -> String {
    let message = error.to_string();
    if message.is_empty() {
        format!("{error:?}")
    } else {
        message
    }
}

/// Substitute `args` into `template`.
#[must_use]
pub fn format_template(template: &str, args: &[ErrorArg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0usize;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }

        let digit = chars.peek().copied().filter(|c| matches!(c, '1'..='9'));
        let index = match digit {
            Some(d) => {
                chars.next();
                (d as usize) - ('1' as usize)
            }
            None => {
                let index = next;
                next += 1;
                index
            }
        };

        if let Some(arg) = args.get(index) {
            out.push_str(&arg.render());
        } else {
            out.push('%');
            if let Some(d) = digit {
                out.push(d);
            }
        }
    }

    out
}

impl From<&str> for ErrorArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ErrorArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ErrorArg {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<&[u8]> for ErrorArg {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for ErrorArg {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&Value> for ErrorArg {
    fn from(value: &Value) -> Self {
        Self::expr(value)
    }
}

impl From<&QName> for ErrorArg {
    fn from(value: &QName) -> Self {
        Self::display(value)
    }
}

impl From<&InputInfo> for ErrorArg {
    fn from(value: &InputInfo) -> Self {
        Self::display(value)
    }
}

impl From<SharedFailure> for ErrorArg {
    fn from(value: SharedFailure) -> Self {
        Self::Failure(value)
    }
}

macro_rules! display_args {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ErrorArg {
                fn from(value: $ty) -> Self {
                    Self::display(value)
                }
            }
        )*
    };
}

display_args!(i32, i64, u32, u64, usize, f64, bool, char);
