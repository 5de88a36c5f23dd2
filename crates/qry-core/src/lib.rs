//! # qry-core
//!
//! Error model for the qry query engine.
//!
//! This crate provides the error vocabulary shared by the parser and the
//! evaluator:
//! - [`QueryError`], the structured error carried through `Result`s
//! - Qualified error names and the static error catalog
//! - Source positions and the parser cursor contract used for late-bound positions
//! - Extension-argument substitution into message templates
//! - Catch clauses that honor the catchability latch
//! - Serializable error reports for tooling

pub mod args;
pub mod catalog;
pub mod catch;
pub mod enums;
pub mod errors;
pub mod info;
pub mod parser;
pub mod qname;
pub mod query_error;
pub mod report;
pub mod text;
pub mod value;

pub use args::{ErrorArg, SharedFailure, failure_message, format_template};
pub use catalog::{CatalogEntry, ErrorDescriptor, ErrorKind};
pub use catch::{CatchClause, CaughtError, NameTest, ResultExt, try_catch};
pub use enums::{Catchability, LineBreak};
pub use errors::CoreError;
pub use info::InputInfo;
pub use parser::{InputParser, StringParser};
pub use qname::QName;
pub use query_error::{QueryError, QueryResult};
pub use report::ErrorReport;
pub use text::MessageText;
pub use value::{ExprInfo, Value};

/// Build a [`QueryError`] from a catalog kind (or any descriptor) and a list
/// of extension arguments.
///
/// ```
/// use qry_core::{ErrorKind, query_error};
///
/// let err = query_error!(ErrorKind::UnknownFunction, "fn:foo");
/// assert_eq!(err.message(), "Unknown function 'fn:foo'.");
/// ```
///
/// A leading `@ info,` installs a source position.
#[macro_export]
macro_rules! query_error {
    (@ $info:expr, $desc:expr $(, $arg:expr)* $(,)?) => {
        $crate::QueryError::with_descriptor(
            ::core::option::Option::Some($info),
            $desc,
            [$($crate::ErrorArg::from($arg)),*],
        )
    };
    ($desc:expr $(, $arg:expr)* $(,)?) => {
        $crate::QueryError::with_descriptor(
            ::core::option::Option::None,
            $desc,
            [$($crate::ErrorArg::from($arg)),*],
        )
    };
}
