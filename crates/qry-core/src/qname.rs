//! Qualified names identifying error categories.
//!
//! A [`QName`] is compared by namespace URI and local part only. The prefix is
//! kept for display so that messages read `err:XPTY0004` rather than the
//! expanded `Q{uri}local` form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Namespace of the standard `err:` error codes.
pub const ERR_URI: &str = "http://www.w3.org/2005/xqt-errors";
/// Prefix bound to [`ERR_URI`].
pub const ERR_PREFIX: &str = "err";
/// Namespace of engine-specific error codes.
pub const QRY_URI: &str = "http://qry.dev/errors";
/// Prefix bound to [`QRY_URI`].
pub const QRY_PREFIX: &str = "qry";

/// Resolve one of the statically known error prefixes to its namespace URI.
#[must_use]
pub fn resolve_prefix(prefix: &str) -> Option<&'static str> {
    match prefix {
        ERR_PREFIX => Some(ERR_URI),
        QRY_PREFIX => Some(QRY_URI),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QName {
    /// Display prefix, if any.
    pub prefix: Option<String>,
    /// Namespace URI. Empty for names in no namespace.
    pub uri: String,
    /// Local part, e.g. `XPST0003`.
    pub local: String,
}

impl QName {
    pub fn new(prefix: Option<&str>, uri: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: prefix.map(str::to_owned),
            uri: uri.into(),
            local: local.into(),
        }
    }

    /// Name in no namespace.
    pub fn local_only(local: impl Into<String>) -> Self {
        Self::new(None, String::new(), local)
    }

    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri && self.local == other.local
    }
}

impl Eq for QName {}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
        self.local.hash(state);
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.prefix, self.uri.is_empty()) {
            (Some(prefix), _) => write!(f, "{prefix}:{}", self.local),
            (None, true) => f.write_str(&self.local),
            (None, false) => write!(f, "Q{{{}}}{}", self.uri, self.local),
        }
    }
}
