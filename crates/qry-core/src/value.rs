//! Values carried by errors for catch handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression-like objects that know how to print themselves within a
/// character budget.
pub trait ExprInfo {
    /// String form truncated to at most `max` characters, followed by `...`
    /// when truncated.
    fn to_bounded_string(&self, max: usize) -> String;
}

/// Result value attached to an error.
///
/// The default is [`Value::Empty`], the empty sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    #[default]
    Empty,
    Boolean(bool),
    Integer(i64),
    Double(
        #[serde(with = "double")]
        #[schemars(with = "double::Repr")]
        f64,
    ),
    Str(String),
    Sequence(Vec<Value>),
}

impl Value {
    /// Build a sequence, collapsing zero items to `Empty` and one item to itself.
    pub fn sequence(items: impl IntoIterator<Item = Self>) -> Self {
        let mut items: Vec<Self> = items
            .into_iter()
            .filter(|item| !item.is_empty())
            .collect();
        match items.len() {
            0 => Self::Empty,
            1 => items.remove(0),
            _ => Self::Sequence(items),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Sequence(items) => items.len(),
            _ => 1,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("()"),
            Self::Boolean(b) => write!(f, "{b}()"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Double(d) => match double::special_name(*d) {
                Some(name) => f.write_str(name),
                None => write!(f, "{d}"),
            },
            Self::Str(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
            Self::Sequence(items) => {
                f.write_str("(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Doubles as JSON: finite values are numbers, `NaN` and the infinities are
/// strings spelled as query literals (`NaN`, `INF`, `-INF`).
mod double {
    use schemars::JsonSchema;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize, JsonSchema)]
    #[serde(untagged)]
    pub(super) enum Repr {
        Number(f64),
        Special(String),
    }

    pub(super) fn special_name(value: f64) -> Option<&'static str> {
        if value.is_nan() {
            Some("NaN")
        } else if value.is_infinite() {
            Some(if value.is_sign_positive() { "INF" } else { "-INF" })
        } else {
            None
        }
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        match special_name(*value) {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_f64(*value),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Special(name) => match name.as_str() {
                "NaN" => Ok(f64::NAN),
                "INF" => Ok(f64::INFINITY),
                "-INF" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!("invalid double '{other}'"))),
            },
        }
    }
}

impl ExprInfo for Value {
    fn to_bounded_string(&self, max: usize) -> String {
        let full = self.to_string();
        if full.chars().count() <= max {
            return full;
        }
        let mut chopped: String = full.chars().take(max).collect();
        chopped.push_str("...");
        chopped
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_sequence() {
        assert_eq!(Value::default(), Value::Empty);
        assert_eq!(Value::default().len(), 0);
    }

    #[test]
    fn sequence_collapses() {
        assert_eq!(Value::sequence([]), Value::Empty);
        assert_eq!(Value::sequence([Value::Integer(1)]), Value::Integer(1));
        assert_eq!(
            Value::sequence([Value::Integer(1), Value::Empty, Value::from("a")]).len(),
            2
        );
    }

    #[test]
    fn display_reads_like_a_query_literal() {
        let value = Value::sequence([Value::Integer(1), Value::from("a\"b"), Value::from(true)]);
        assert_eq!(value.to_string(), "(1, \"a\"\"b\", true())");
    }

    #[test]
    fn non_finite_doubles_survive_json() {
        let json = serde_json::to_string(&Value::Double(f64::NAN)).unwrap();
        assert_eq!(json, r#"{"type":"double","value":"NaN"}"#);
        let back: Value = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, Value::Double(d) if d.is_nan()));

        let seq = Value::sequence([
            Value::Double(f64::INFINITY),
            Value::Double(f64::NEG_INFINITY),
            Value::Double(1.5),
        ]);
        let back: Value = serde_json::from_str(&serde_json::to_string(&seq).unwrap()).unwrap();
        assert_eq!(back, seq);
        assert_eq!(seq.to_string(), "(INF, -INF, 1.5)");
    }

    #[test]
    fn unknown_double_names_are_rejected() {
        let parsed = serde_json::from_str::<Value>(r#"{"type":"double","value":"inf"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn bounded_string_truncates() {
        let value = Value::from("abcdefgh");
        assert_eq!(value.to_bounded_string(4), "\"abc...");
        assert_eq!(value.to_bounded_string(usize::MAX), "\"abcdefgh\"");
    }
}
