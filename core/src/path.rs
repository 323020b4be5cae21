//! `FieldPath` — Dot-separated map-key paths
//!
//! A path like `metadata.labels.app` is a sequence of literal map keys.
//! There is no array indexing and there are no wildcards: every segment
//! must name a key of the map reached so far.

use crate::FieldValue;
use serde_json::{Map, Value};
use std::fmt;

/// A parsed dot-notation path.
///
/// Splitting happens once, when the path is built, so evaluation never
/// re-parses.
///
/// # Example
///
/// ```
/// use kmenu::FieldPath;
/// use serde_json::json;
///
/// let doc = json!({"spec": {"nodeName": "node-01"}});
/// let root = doc.as_object().unwrap();
///
/// let path = FieldPath::parse("spec.nodeName");
/// assert_eq!(path.resolve(root).as_str(), Some("node-01"));
/// assert!(FieldPath::parse("spec.missing").resolve(root).is_absent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dot-separated path.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = raw.split('.').map(str::to_owned).collect();
        Self { raw, segments }
    }

    /// The path as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The individual key segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns `true` if the path is non-empty and has no empty segments.
    ///
    /// Paths like `a..b` or `labels.` are accepted by configuration but can
    /// never resolve.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.raw.is_empty() && self.segments.iter().all(|s| !s.is_empty())
    }

    /// Walk `root` along this path.
    ///
    /// Returns [`FieldValue::Absent`] when a key is missing, when a non-map
    /// value is reached before the last segment, or when the path is not
    /// well formed. An explicit `null` at the end of the path is
    /// [`FieldValue::Null`].
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a Map<String, Value>) -> FieldValue<'a> {
        if !self.is_well_formed() {
            return FieldValue::Absent;
        }
        let Some((last, parents)) = self.segments.split_last() else {
            return FieldValue::Absent;
        };

        let mut current = root;
        for segment in parents {
            match current.get(segment) {
                Some(Value::Object(map)) => current = map,
                _ => return FieldValue::Absent,
            }
        }
        FieldValue::from(current.get(last))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for FieldPath {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

/// Resolve a dot-separated path string against a map in one call.
#[must_use]
pub fn resolve<'a>(root: &'a Map<String, Value>, path: &str) -> FieldValue<'a> {
    FieldPath::parse(path).resolve(root)
}
