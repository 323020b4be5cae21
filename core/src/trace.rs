//! Evaluation trace types for debugging menu filtering.
//!
//! Trace types mirror the runtime types ([`Condition`](crate::Condition),
//! [`MenuItem`](crate::MenuItem)) but capture evaluation results instead of
//! inputs. Use `explain()` to see why an entry was shown or hidden.
//!
//! Unlike normal evaluation, tracing does NOT short-circuit: every condition
//! of an entry is evaluated so the full picture is visible. The `matched`
//! result is still the same as `matches()`.

use std::fmt;

/// Trace of one condition evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionTrace {
    /// Path the condition inspected.
    pub path: String,
    /// Key pattern as configured (before anchoring).
    pub key_pattern: String,
    /// Value pattern as configured (before anchoring).
    pub value_pattern: String,
    /// Whether the condition is inverted.
    pub invert: bool,
    /// Kind of value the path resolved to (`"absent"`, `"map"`, ...).
    pub kind: &'static str,
    /// Text of the resolved value (compact JSON for maps and sequences).
    pub found: String,
    /// Final result, after `invert`.
    pub matched: bool,
}

/// Trace of one menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTrace {
    /// Entry title.
    pub title: String,
    /// Whether the entry is shown.
    pub matched: bool,
    /// `false` when no record was available.
    pub has_record: bool,
    /// Number of configured conditions, evaluated or not.
    pub condition_count: usize,
    /// One trace per condition, in declaration order.
    pub conditions: Vec<ConditionTrace>,
}

impl fmt::Display for ConditionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.matched { "pass" } else { "FAIL" };
        let invert = if self.invert { " (inverted)" } else { "" };
        write!(
            f,
            "[{verdict}] {} key={:?} value={:?}{invert}: found {}",
            self.path, self.key_pattern, self.value_pattern, self.kind
        )?;
        if !self.found.is_empty() {
            write!(f, " {:?}", self.found)?;
        }
        Ok(())
    }
}

impl fmt::Display for EntryTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.matched { "shown" } else { "hidden" };
        write!(f, "{} — {verdict}", self.title)?;
        if self.condition_count == 0 {
            return write!(f, " (no conditions)");
        }
        if !self.has_record {
            return write!(
                f,
                " (no record; {} condition(s) not evaluated)",
                self.condition_count
            );
        }
        for condition in &self.conditions {
            write!(f, "\n  {condition}")?;
        }
        Ok(())
    }
}
