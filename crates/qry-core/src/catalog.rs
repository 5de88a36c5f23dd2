//! Static catalog of known error conditions.
//!
//! Every [`ErrorKind`] binds a qualified error code to a message template.
//! Custom conditions (for example codes raised by user code) are expressed as
//! an [`ErrorDescriptor`] without a kind.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;
use crate::qname::{ERR_PREFIX, ERR_URI, QName, QRY_PREFIX, QRY_URI};

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Known error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Catch-all for failures without a more specific code.
    Generic,
    UnexpectedToken,
    UndeclaredVariable,
    UnknownFunction,
    TypeMismatch,
    DuplicateFunction,
    DivisionByZero,
    UserError,
    InvalidCast,
    /// Evaluation exceeded its time budget.
    Timeout,
    /// Evaluation exhausted its memory budget.
    OutOfMemory,
}

impl ErrorKind {
    pub const ALL: [Self; 11] = [
        Self::Generic,
        Self::UnexpectedToken,
        Self::UndeclaredVariable,
        Self::UnknownFunction,
        Self::TypeMismatch,
        Self::DuplicateFunction,
        Self::DivisionByZero,
        Self::UserError,
        Self::InvalidCast,
        Self::Timeout,
        Self::OutOfMemory,
    ];

    /// Local part of the error code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Generic => "QRY0000",
            Self::UnexpectedToken => "XPST0003",
            Self::UndeclaredVariable => "XPST0008",
            Self::UnknownFunction => "XPST0017",
            Self::TypeMismatch => "XPTY0004",
            Self::DuplicateFunction => "XQST0034",
            Self::DivisionByZero => "FOAR0001",
            Self::UserError => "FOER0000",
            Self::InvalidCast => "FORG0001",
            Self::Timeout => "QRY0001",
            Self::OutOfMemory => "QRY0002",
        }
    }

    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Generic | Self::Timeout | Self::OutOfMemory => QRY_PREFIX,
            _ => ERR_PREFIX,
        }
    }

    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Generic | Self::Timeout | Self::OutOfMemory => QRY_URI,
            _ => ERR_URI,
        }
    }

    /// Message template; see [`format_template`](crate::format_template).
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Generic => "%",
            Self::UnexpectedToken => "Unexpected token '%'.",
            Self::UndeclaredVariable => "Undeclared variable $%.",
            Self::UnknownFunction => "Unknown function '%'.",
            Self::TypeMismatch => "Expected %, found %.",
            Self::DuplicateFunction => "Duplicate declaration of function '%'.",
            Self::DivisionByZero => "Division by zero.",
            Self::UserError => "Halted on error().",
            Self::InvalidCast => "Invalid % value: %.",
            Self::Timeout => "Evaluation timed out after % ms.",
            Self::OutOfMemory => "Out of memory while evaluating %.",
        }
    }

    /// Conditions that must never be intercepted by catch clauses.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Timeout | Self::OutOfMemory)
    }

    #[must_use]
    pub fn qname(self) -> QName {
        QName::new(Some(self.prefix()), self.namespace(), self.code())
    }

    #[must_use]
    pub fn descriptor(self) -> ErrorDescriptor {
        ErrorDescriptor {
            name: self.qname(),
            template: self.template().to_owned(),
            kind: Some(self),
        }
    }

    /// Look up a kind by `prefix:code` or bare code.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCode`] if no kind matches.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        let (prefix, local) = match code.split_once(':') {
            Some((prefix, local)) => (Some(prefix), local),
            None => (None, code),
        };

        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == local && prefix.is_none_or(|p| p == kind.prefix()))
            .ok_or_else(|| CoreError::UnknownCode(code.to_owned()))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix(), self.code())
    }
}

// ---------------------------------------------------------------------------
// ErrorDescriptor
// ---------------------------------------------------------------------------

/// An error name bound to a message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    name: QName,
    template: String,
    kind: Option<ErrorKind>,
}

impl ErrorDescriptor {
    /// Descriptor outside the static catalog.
    pub fn new(name: QName, template: impl Into<String>) -> Self {
        Self {
            name,
            template: template.into(),
            kind: None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &QName {
        &self.name
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Catalog kind, if this descriptor came from the catalog.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        self.kind
    }
}

impl From<ErrorKind> for ErrorDescriptor {
    fn from(kind: ErrorKind) -> Self {
        kind.descriptor()
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Serializable view of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    pub kind: ErrorKind,
    pub code: String,
    pub namespace: String,
    pub template: String,
    pub fatal: bool,
}

impl From<ErrorKind> for CatalogEntry {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            code: kind.to_string(),
            namespace: kind.namespace().to_owned(),
            template: kind.template().to_owned(),
            fatal: kind.is_fatal(),
        }
    }
}

/// All catalog entries, in declaration order.
#[must_use]
pub fn entries() -> Vec<CatalogEntry> {
    ErrorKind::ALL.into_iter().map(CatalogEntry::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = ErrorKind::ALL.iter().map(|k| k.qname()).collect();
        assert_eq!(codes.len(), ErrorKind::ALL.len());
    }

    #[rstest]
    #[case("XPST0003", ErrorKind::UnexpectedToken)]
    #[case("err:XPTY0004", ErrorKind::TypeMismatch)]
    #[case("qry:QRY0001", ErrorKind::Timeout)]
    #[case("QRY0000", ErrorKind::Generic)]
    fn lookup_by_code(#[case] code: &str, #[case] expected: ErrorKind) {
        assert_eq!(ErrorKind::from_code(code), Ok(expected));
    }

    #[rstest]
    #[case("XPST9999")]
    #[case("qry:XPST0003")]
    #[case("xpst0003")]
    fn lookup_rejects_unknown(#[case] code: &str) {
        assert_eq!(
            ErrorKind::from_code(code),
            Err(CoreError::UnknownCode(code.to_owned()))
        );
    }

    #[test]
    fn descriptor_carries_kind() {
        let desc = ErrorDescriptor::from(ErrorKind::UnknownFunction);
        assert_eq!(desc.kind(), Some(ErrorKind::UnknownFunction));
        assert_eq!(desc.name().to_string(), "err:XPST0017");
        assert_eq!(desc.template(), "Unknown function '%'.");
    }

    #[test]
    fn custom_descriptor_has_no_kind() {
        let desc = ErrorDescriptor::new(QName::local_only("XYZ0001"), "unexpected token '%'");
        assert_eq!(desc.kind(), None);
    }

    #[test]
    fn only_limits_are_fatal() {
        let fatal: Vec<_> = ErrorKind::ALL.into_iter().filter(|k| k.is_fatal()).collect();
        assert_eq!(fatal, vec![ErrorKind::Timeout, ErrorKind::OutOfMemory]);
    }

    #[test]
    fn entries_export_every_kind() {
        let all = entries();
        assert_eq!(all.len(), ErrorKind::ALL.len());
        assert_eq!(all[1].code, "err:XPST0003");
        assert!(all.iter().any(|e| e.fatal));
    }
}
