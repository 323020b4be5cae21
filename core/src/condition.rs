//! Condition — One regex check against a record field
//!
//! A condition resolves its path and then picks a rule by what it found:
//!
//! | Resolved      | Base result                                                   |
//! |---------------|---------------------------------------------------------------|
//! | absent / null | `false`                                                       |
//! | map           | some entry's key matches `key` and its value matches `value`  |
//! | scalar        | the value matches `value` (`key` is ignored)                  |
//! | sequence      | some element matches `value` (`key` is ignored)               |
//!
//! The final result is the base result, negated when `invert` is set. That
//! makes "must not have this label" a plain condition: a missing field with
//! `invert` evaluates to `true`.

use crate::stringify::stringify;
use crate::trace::ConditionTrace;
use crate::{FieldPath, FieldValue, Pattern, Record};
use tracing::debug;

/// A compiled condition.
///
/// Built by configuration validation; both patterns are already anchored and
/// compiled, so evaluation cannot fail.
///
/// # Example
///
/// ```
/// use kmenu::{Condition, FieldPath, Pattern, Record};
///
/// let record: Record = r#"{"metadata": {"labels": {"app": "nginx"}}}"#.parse().unwrap();
/// let condition = Condition::new(
///     FieldPath::parse("metadata.labels"),
///     Pattern::compile("app").unwrap(),
///     Pattern::compile("nginx").unwrap(),
///     false,
/// );
/// assert!(condition.evaluate(&record));
/// ```
#[derive(Debug, Clone)]
pub struct Condition {
    path: FieldPath,
    key: Pattern,
    value: Pattern,
    invert: bool,
}

impl Condition {
    /// Create a condition from compiled parts.
    #[must_use]
    pub fn new(path: FieldPath, key: Pattern, value: Pattern, invert: bool) -> Self {
        Self {
            path,
            key,
            value,
            invert,
        }
    }

    /// The path this condition inspects.
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Pattern applied to map keys.
    #[must_use]
    pub fn key_pattern(&self) -> &Pattern {
        &self.key
    }

    /// Pattern applied to values.
    #[must_use]
    pub fn value_pattern(&self) -> &Pattern {
        &self.value
    }

    /// Whether the base result is negated.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    /// Evaluate this condition against a record.
    pub fn evaluate(&self, record: &Record) -> bool {
        let resolved = record.resolve_path(&self.path);
        let base = self.matches_value(&resolved);
        let matched = base != self.invert;
        debug!(
            path = %self.path,
            kind = resolved.type_name(),
            base,
            invert = self.invert,
            matched,
            "condition evaluated"
        );
        matched
    }

    /// The base rule, before `invert` is applied.
    #[must_use]
    pub fn matches_value(&self, value: &FieldValue<'_>) -> bool {
        match *value {
            FieldValue::Absent | FieldValue::Null => false,
            FieldValue::Map(entries) => entries
                .iter()
                .any(|(k, v)| self.key.is_match(k) && self.value.is_match(&stringify(v))),
            // Elements are stringified as-is; objects inside arrays are only
            // seen as their compact JSON text.
            FieldValue::Sequence(items) => {
                items.iter().any(|v| self.value.is_match(&stringify(v)))
            }
            FieldValue::String(_) | FieldValue::Number(_) | FieldValue::Bool(_) => {
                self.value.is_match(&value.to_text())
            }
        }
    }

    /// Evaluate with a record of what was found, for debugging.
    #[must_use]
    pub fn evaluate_with_trace(&self, record: &Record) -> ConditionTrace {
        let resolved = record.resolve_path(&self.path);
        let base = self.matches_value(&resolved);
        ConditionTrace {
            path: self.path.to_string(),
            key_pattern: self.key.source().to_string(),
            value_pattern: self.value.source().to_string(),
            invert: self.invert,
            kind: resolved.type_name(),
            found: resolved.to_text().into_owned(),
            matched: base != self.invert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POD: &str = r#"{
        "metadata": {
            "name": "nginx-abc123",
            "labels": {"app": "nginx", "env": "production", "team": "platform"},
            "annotations": {
                "prometheus.io/scrape": "true",
                "prometheus.io/port": "9090"
            },
            "deletionTimestamp": null
        },
        "spec": {
            "nodeName": "prod-pool-node-01",
            "restartPolicy": "Always",
            "priority": 1000,
            "hostNetwork": false,
            "tolerations": ["a", "b"],
            "containers": [{"name": "nginx"}, {"name": "sidecar"}]
        },
        "status": {"phase": "Running"}
    }"#;

    fn record() -> Record {
        POD.parse().unwrap()
    }

    fn cond(path: &str, key: &str, value: &str, invert: bool) -> Condition {
        Condition::new(
            FieldPath::parse(path),
            Pattern::compile(key).unwrap(),
            Pattern::compile(value).unwrap(),
            invert,
        )
    }

    #[test]
    fn test_map_labels() {
        let r = record();
        let cases = [
            ("exact key exists (any value)", "app", ".*", true),
            ("exact key+value match", "app", "nginx", true),
            ("exact key, wrong value", "app", "redis", false),
            ("key does not exist", "version", ".*", false),
            ("key regex wildcard matches any key", ".*", "platform", true),
            ("key regex prefix match", "te.*", "platform", true),
            ("key regex substring with .*", ".*ea.*", ".*", true),
            ("value regex prefix match", "env", "prod.*", true),
            ("implicit anchoring prevents substring match", "pp", ".*", false),
            ("implicit anchoring on value prevents substring", "app", "ngin", false),
        ];
        for (name, key, value, want) in cases {
            assert_eq!(
                cond("metadata.labels", key, value, false).evaluate(&r),
                want,
                "{name}"
            );
        }
    }

    #[test]
    fn test_key_and_value_must_match_same_entry() {
        let r = record();
        // "app" exists and "production" exists, but not on the same entry.
        assert!(!cond("metadata.labels", "app", "production", false).evaluate(&r));
    }

    #[test]
    fn test_map_annotations() {
        let r = record();
        assert!(cond("metadata.annotations", r"prometheus\.io/scrape", ".*", false).evaluate(&r));
        assert!(cond("metadata.annotations", r"prometheus\.io/port", "9090", false).evaluate(&r));
        assert!(cond("metadata.annotations", r"prometheus\.io/.*", "true", false).evaluate(&r));
        assert!(!cond("metadata.annotations", r"internal\.skip", ".*", false).evaluate(&r));
    }

    #[test]
    fn test_scalar() {
        let r = record();
        assert!(cond("status.phase", ".*", "Running", false).evaluate(&r));
        assert!(!cond("status.phase", ".*", "Pending", false).evaluate(&r));
        assert!(cond("spec.nodeName", ".*", "prod-.*", false).evaluate(&r));
        assert!(!cond("spec.nodeName", ".*", "staging-.*", false).evaluate(&r));
        assert!(cond("spec.restartPolicy", ".*", "Always", false).evaluate(&r));
    }

    #[test]
    fn test_scalar_ignores_key_pattern() {
        let r = record();
        assert!(cond("status.phase", "no-such-key", "Running", false).evaluate(&r));
    }

    #[test]
    fn test_number_and_bool_scalars() {
        let r = record();
        assert!(cond("spec.priority", ".*", "1000", false).evaluate(&r));
        assert!(cond("spec.priority", ".*", r"\d+", false).evaluate(&r));
        assert!(cond("spec.hostNetwork", ".*", "false", false).evaluate(&r));
    }

    #[test]
    fn test_sequence() {
        let r = record();
        assert!(cond("spec.tolerations", ".*", "b", false).evaluate(&r));
        assert!(!cond("spec.tolerations", ".*", "c", false).evaluate(&r));
        // Objects are only visible as compact JSON text.
        assert!(cond("spec.containers", ".*", r#".*"name":"sidecar".*"#, false).evaluate(&r));
        assert!(!cond("spec.containers", ".*", "sidecar", false).evaluate(&r));
    }

    #[test]
    fn test_missing_and_null() {
        let r = record();
        assert!(!cond("metadata.nonexistent", ".*", ".*", false).evaluate(&r));
        assert!(!cond("x.y.z", ".*", ".*", false).evaluate(&r));
        assert!(!cond("metadata.deletionTimestamp", ".*", ".*", false).evaluate(&r));
        assert!(cond("x.y.z", ".*", ".*", true).evaluate(&r));
        assert!(cond("metadata.deletionTimestamp", ".*", ".*", true).evaluate(&r));
    }

    #[test]
    fn test_invert() {
        let r = record();
        let cases = [
            ("invert existing label", "metadata.labels", "app", ".*", false),
            ("invert missing label", "metadata.labels", "version", ".*", true),
            ("invert missing path", "metadata.nothing", ".*", ".*", true),
            ("invert scalar match", "status.phase", ".*", "Running", false),
            ("invert scalar mismatch", "status.phase", ".*", "Pending", true),
        ];
        for (name, path, key, value, want) in cases {
            assert_eq!(cond(path, key, value, true).evaluate(&r), want, "{name}");
        }
    }

    #[test]
    fn test_invert_is_pure_negation() {
        let r = record();
        let probes = [
            ("metadata.labels", "app", "nginx"),
            ("metadata.labels", "nope", ".*"),
            ("status.phase", ".*", "Running"),
            ("spec.tolerations", ".*", "z"),
            ("metadata.deletionTimestamp", ".*", ".*"),
            ("does.not.exist", ".*", ".*"),
        ];
        for (path, key, value) in probes {
            let plain = cond(path, key, value, false).evaluate(&r);
            let inverted = cond(path, key, value, true).evaluate(&r);
            assert_eq!(inverted, !plain, "{path}");
        }
    }

    #[test]
    fn test_trace() {
        let r = record();
        let trace = cond("status.phase", ".*", "Pending", true).evaluate_with_trace(&r);
        assert!(trace.matched);
        assert_eq!(trace.kind, "string");
        assert_eq!(trace.found, "Running");

        let trace = cond("metadata.missing", ".*", ".*", false).evaluate_with_trace(&r);
        assert!(!trace.matched);
        assert_eq!(trace.kind, "absent");
    }

    #[test]
    fn test_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Condition>();
    }
}
