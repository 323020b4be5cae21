//! `FieldValue` — Borrowed view of whatever a path resolved to
//!
//! Records are decoded into a `serde_json::Value` tree once. Path resolution
//! never copies out of that tree; it hands back a `FieldValue` that borrows
//! from it and tells the evaluator which matching rule applies.
//!
//! # Absent vs Null
//!
//! `Absent` means the path did not resolve (missing key, or a non-map in the
//! middle of the path). `Null` means the path resolved to an explicit JSON
//! `null`. Matching treats both as "missing"; diagnostics keep them apart.

use crate::stringify::format_number;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

/// The result of resolving a path against a record.
///
/// # Example
///
/// ```
/// use kmenu::FieldValue;
/// use serde_json::json;
///
/// let doc = json!({"phase": "Running"});
/// let value = FieldValue::from(doc.get("phase"));
/// assert_eq!(value.as_str(), Some("Running"));
///
/// let missing = FieldValue::from(doc.get("nodeName"));
/// assert!(missing.is_absent());
/// assert!(missing.is_missing());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// The path did not resolve.
    Absent,

    /// The path resolved to an explicit `null`.
    Null,

    /// A nested mapping (e.g. `metadata.labels`).
    Map(&'a Map<String, Value>),

    /// An ordered list (e.g. `spec.containers`).
    Sequence(&'a [Value]),

    /// String scalar.
    String(&'a str),

    /// Numeric scalar.
    Number(&'a Number),

    /// Boolean scalar.
    Bool(bool),
}

impl<'a> FieldValue<'a> {
    /// Wrap a present JSON value.
    #[must_use]
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s.as_str()),
            Value::Array(items) => Self::Sequence(items.as_slice()),
            Value::Object(map) => Self::Map(map),
        }
    }

    /// Returns `true` if the path did not resolve.
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if the path resolved to an explicit `null`.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for both `Absent` and `Null`.
    ///
    /// This is the "field does not exist" case for matching and templating.
    #[inline]
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Absent | Self::Null)
    }

    /// Returns `true` for string, number and boolean values.
    #[inline]
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::String(_) | Self::Number(_) | Self::Bool(_))
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a mapping.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&'a Map<String, Value>> {
        match *self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Try to get the value as a sequence.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&'a [Value]> {
        match *self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a string describing the kind of this value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Null => "null",
            Self::Map(_) => "map",
            Self::Sequence(_) => "sequence",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
        }
    }

    /// Render the value as text for matching and substitution.
    ///
    /// `Absent` and `Null` render as the empty string. Maps and sequences
    /// render as compact JSON.
    #[must_use]
    pub fn to_text(&self) -> Cow<'a, str> {
        match *self {
            Self::Absent | Self::Null => Cow::Borrowed(""),
            Self::String(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(format_number(n)),
            Self::Bool(b) => Cow::Borrowed(if b { "true" } else { "false" }),
            Self::Map(m) => Cow::Owned(Value::Object(m.clone()).to_string()),
            Self::Sequence(items) => Cow::Owned(Value::Array(items.to_vec()).to_string()),
        }
    }
}

impl Default for FieldValue<'_> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<'a> From<&'a Value> for FieldValue<'a> {
    fn from(value: &'a Value) -> Self {
        Self::from_value(value)
    }
}

impl<'a> From<Option<&'a Value>> for FieldValue<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(Self::Absent, Self::from_value)
    }
}
