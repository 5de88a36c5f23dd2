//! Catch clauses and propagation helpers.
//!
//! A catch clause intercepts an error when one of its name tests matches the
//! error name, but only while the error is catchable. Uncatchable errors
//! always propagate.

use serde::Serialize;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::info::InputInfo;
use crate::qname::{QName, resolve_prefix};
use crate::query_error::{QueryError, QueryResult};
use crate::value::Value;

// ---------------------------------------------------------------------------
// NameTest
// ---------------------------------------------------------------------------

/// Test against an error name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTest {
    /// `*`
    Wildcard,
    /// `*:local`
    Local(String),
    /// `prefix:*`, holding the resolved namespace URI.
    Namespace(String),
    /// `prefix:local` or `local`.
    Exact(QName),
}

impl NameTest {
    #[must_use]
    pub fn matches(&self, name: &QName) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Local(local) => name.local() == local,
            Self::Namespace(uri) => name.uri() == uri,
            Self::Exact(expected) => expected == name,
        }
    }
}

impl FromStr for NameTest {
    type Err = CoreError;

    fn from_str(test: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidNameTest {
            test: test.to_owned(),
            reason: reason.to_owned(),
        };

        let test = test.trim();
        if test == "*" {
            return Ok(Self::Wildcard);
        }

        let Some((prefix, local)) = test.split_once(':') else {
            if test.is_empty() {
                return Err(invalid("empty name test"));
            }
            return Ok(Self::Exact(QName::local_only(test)));
        };

        if prefix.is_empty() || local.is_empty() {
            return Err(invalid("missing prefix or local name"));
        }

        match (prefix, local) {
            ("*", "*") => Ok(Self::Wildcard),
            ("*", local) => Ok(Self::Local(local.to_owned())),
            (prefix, local) => {
                let uri = resolve_prefix(prefix)
                    .ok_or_else(|| invalid(&format!("unknown prefix '{prefix}'")))?;
                if local == "*" {
                    Ok(Self::Namespace(uri.to_owned()))
                } else {
                    Ok(Self::Exact(QName::new(Some(prefix), uri, local)))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CatchClause
// ---------------------------------------------------------------------------

/// Alternatives of a single catch clause, e.g. `err:XPTY0004 | err:FORG0001`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatchClause {
    tests: Vec<NameTest>,
}

impl CatchClause {
    #[must_use]
    pub const fn new(tests: Vec<NameTest>) -> Self {
        Self { tests }
    }

    /// `catch *`
    #[must_use]
    pub fn any() -> Self {
        Self::new(vec![NameTest::Wildcard])
    }

    #[must_use]
    pub fn tests(&self) -> &[NameTest] {
        &self.tests
    }

    /// Whether this clause would intercept `error`, ignoring catchability.
    #[must_use]
    pub fn matches(&self, error: &QueryError) -> bool {
        self.tests.iter().any(|test| test.matches(error.name()))
    }
}

impl FromStr for CatchClause {
    type Err = CoreError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let tests = text
            .split('|')
            .map(str::parse::<NameTest>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tests))
    }
}

// ---------------------------------------------------------------------------
// CaughtError
// ---------------------------------------------------------------------------

/// Variables bound inside a catch handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaughtError {
    pub code: QName,
    pub description: String,
    pub value: Value,
    pub module: Option<String>,
    pub line_number: u32,
    pub column_number: u32,
}

impl From<&QueryError> for CaughtError {
    fn from(error: &QueryError) -> Self {
        Self {
            code: error.name().clone(),
            description: error.message().to_owned(),
            value: error.value().clone(),
            module: error.file().map(str::to_owned),
            line_number: error.line(),
            column_number: error.column(),
        }
    }
}

/// Run the first matching clause's handler on a catchable error.
///
/// The handler receives the index of the matching clause and the bound catch
/// variables. Errors that are uncatchable or match no clause are returned
/// unchanged.
///
/// # Errors
///
/// Returns the original error when it is not intercepted, or whatever the
/// handler returns.
pub fn try_catch<T, F>(result: QueryResult<T>, clauses: &[CatchClause], handler: F) -> QueryResult<T>
where
    F: FnOnce(usize, CaughtError) -> QueryResult<T>,
{
    let error = match result {
        Ok(value) => return Ok(value),
        Err(error) => error,
    };

    if !error.is_catchable() {
        tracing::debug!(code = %error.name(), "uncatchable error bypasses catch clauses");
        return Err(error);
    }

    match clauses.iter().position(|clause| clause.matches(&error)) {
        Some(index) => {
            tracing::debug!(code = %error.name(), clause = index, "error caught");
            handler(index, CaughtError::from(&error))
        }
        None => Err(error),
    }
}

// ---------------------------------------------------------------------------
// ResultExt
// ---------------------------------------------------------------------------

/// Propagation helpers for [`QueryResult`].
pub trait ResultExt<T> {
    /// On error, append `info` to the trace of the propagating error.
    ///
    /// # Errors
    ///
    /// Returns the original error with the extra trace entry.
    fn in_frame(self, info: Option<&InputInfo>) -> QueryResult<T>;
}

impl<T> ResultExt<T> for QueryResult<T> {
    fn in_frame(self, info: Option<&InputInfo>) -> Self {
        self.map_err(|mut error| {
            error.add_trace(info.cloned());
            error
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ErrorKind;
    use crate::qname::{ERR_URI, QRY_URI};
    use crate::query_error;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("*", NameTest::Wildcard)]
    #[case("*:*", NameTest::Wildcard)]
    #[case("*:XPTY0004", NameTest::Local("XPTY0004".into()))]
    #[case("err:*", NameTest::Namespace(ERR_URI.into()))]
    #[case("qry:QRY0001", NameTest::Exact(QName::new(Some("qry"), QRY_URI, "QRY0001")))]
    #[case("E1", NameTest::Exact(QName::local_only("E1")))]
    fn parses_name_tests(#[case] text: &str, #[case] expected: NameTest) {
        assert_eq!(text.parse::<NameTest>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("err:")]
    #[case(":x")]
    #[case("foo:bar")]
    fn rejects_bad_name_tests(#[case] text: &str) {
        assert!(matches!(
            text.parse::<NameTest>(),
            Err(CoreError::InvalidNameTest { .. })
        ));
    }

    #[test]
    fn clause_alternatives() {
        let clause: CatchClause = "err:XPTY0004 | err:FORG0001".parse().unwrap();
        assert_eq!(clause.tests().len(), 2);
        assert!(clause.matches(&query_error!(ErrorKind::InvalidCast, "xs:integer", "a")));
        assert!(!clause.matches(&query_error!(ErrorKind::DivisionByZero)));
    }

    #[test]
    fn catches_matching_error() {
        let info = InputInfo::new(3, 9).with_file("m.xq");
        let error = query_error!(@ info, ErrorKind::DivisionByZero).with_value(Value::Integer(0));
        let result: QueryResult<i64> = Err(error);

        let clauses: [CatchClause; 2] = ["err:XPST0003".parse().unwrap(), "err:*".parse().unwrap()];
        let caught = try_catch(result, &clauses, |index, caught| {
            assert_eq!(index, 1);
            assert_eq!(caught.code, ErrorKind::DivisionByZero.qname());
            assert_eq!(caught.description, "Division by zero.");
            assert_eq!(caught.value, Value::Integer(0));
            assert_eq!(caught.module.as_deref(), Some("m.xq"));
            assert_eq!((caught.line_number, caught.column_number), (3, 9));
            Ok(-1)
        });
        assert_eq!(caught.unwrap(), -1);
    }

    #[test]
    fn unmatched_error_propagates() {
        let result: QueryResult<()> = Err(query_error!(ErrorKind::UserError));
        let clauses = [CatchClause::new(vec![NameTest::Local("XPTY0004".into())])];
        let err = try_catch(result, &clauses, |_, _| Ok(())).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::UserError));
    }

    #[test]
    fn uncatchable_error_bypasses_wildcard() {
        let result: QueryResult<()> = Err(QueryError::new("stop").uncatchable());
        let err = try_catch(result, &[CatchClause::any()], |_, _| {
            panic!("handler must not run")
        })
        .unwrap_err();
        assert!(!err.is_catchable());
    }

    #[test]
    fn ok_passes_through() {
        let result: QueryResult<u8> = Ok(7);
        assert_eq!(try_catch(result, &[CatchClause::any()], |_, _| Ok(0)).unwrap(), 7);
    }

    #[test]
    fn frames_append_in_unwind_order() {
        fn inner() -> QueryResult<()> {
            Err(QueryError::new("boom").at(InputInfo::new(1, 1)))
        }
        fn middle() -> QueryResult<()> {
            inner().in_frame(Some(&InputInfo::new(5, 2)))
        }
        fn outer() -> QueryResult<()> {
            middle().in_frame(None)?;
            Ok(())
        }

        let err = outer()
            .in_frame(Some(&InputInfo::new(9, 4)))
            .unwrap_err();
        assert_eq!(err.trace(), [InputInfo::new(5, 2), InputInfo::new(9, 4)]);
    }
}
