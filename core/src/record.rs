//! `Record` — The decoded document menu entries are matched against
//!
//! Typically the full `kubectl get pod -o json` output for one pod. The
//! decoded tree is read-only once built; the raw bytes are kept for
//! diagnostics.

use crate::error::RecordError;
use crate::stringify::stringify;
use crate::{FieldPath, FieldValue};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A decoded, object-rooted JSON document.
///
/// # Example
///
/// ```
/// use kmenu::Record;
///
/// let record = Record::from_slice(br#"{"status": {"phase": "Running"}}"#).unwrap();
/// assert_eq!(record.resolve("status.phase").as_str(), Some("Running"));
/// assert!(record.resolve("status.podIP").is_absent());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    raw: Vec<u8>,
    root: Map<String, Value>,
}

impl Record {
    /// Decode a record from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the bytes are not JSON or the root is not
    /// an object.
    pub fn from_slice(raw: impl Into<Vec<u8>>) -> Result<Self, RecordError> {
        let raw = raw.into();
        let value: Value = serde_json::from_slice(&raw)?;
        match value {
            Value::Object(root) => Ok(Self { raw, root }),
            other => Err(RecordError::NotAnObject {
                found: FieldValue::from(&other).type_name(),
            }),
        }
    }

    /// Build a record from an already decoded value.
    ///
    /// The raw form is the compact serialization of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotAnObject`] if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(root) => {
                let raw = serde_json::to_vec(&root)?;
                Ok(Self { raw, root })
            }
            other => Err(RecordError::NotAnObject {
                found: FieldValue::from(&other).type_name(),
            }),
        }
    }

    /// The bytes the record was decoded from.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The decoded root object.
    #[must_use]
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Resolve a dot-separated path string.
    #[must_use]
    pub fn resolve(&self, path: &str) -> FieldValue<'_> {
        crate::path::resolve(&self.root, path)
    }

    /// Resolve an already parsed path.
    #[must_use]
    pub fn resolve_path(&self, path: &FieldPath) -> FieldValue<'_> {
        path.resolve(&self.root)
    }

    /// `metadata.labels` as sorted `key → text` pairs.
    ///
    /// Empty when the record has no labels map.
    #[must_use]
    pub fn labels(&self) -> BTreeMap<String, String> {
        self.resolve("metadata.labels")
            .as_map()
            .map(|labels| {
                labels
                    .iter()
                    .map(|(k, v)| (k.clone(), stringify(v).into_owned()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every leaf reachable from the root as a `path = value` line.
    ///
    /// Lines are sorted by path. Array elements contribute their index as a
    /// path segment (`spec.containers.0.name`), nulls render as an empty
    /// value, and empty maps or arrays contribute nothing.
    #[must_use]
    pub fn flatten_paths(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        for (key, child) in &self.root {
            flatten_into(key.clone(), child, &mut leaves);
        }
        leaves.sort_by(|a, b| a.0.cmp(&b.0));
        leaves
            .into_iter()
            .map(|(path, value)| format!("{path} = {value}"))
            .collect()
    }
}

fn flatten_into(path: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(format!("{path}.{key}"), child, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(format!("{path}.{index}"), child, out);
            }
        }
        leaf => {
            let text = stringify(leaf).into_owned();
            out.push((path, text));
        }
    }
}

impl FromStr for Record {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}
