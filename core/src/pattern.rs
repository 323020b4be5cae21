//! `Pattern` — Implicitly anchored regular expressions
//!
//! Condition patterns always match the *whole* candidate string. A user who
//! writes `app` gets `^app$`; substring matching has to be spelled out as
//! `.*app.*`. Anchors are only added where missing, so `^app$` stays as is.

use regex::Regex;
use std::borrow::Cow;
use std::fmt;

/// Source used when a configuration omits a pattern. Matches anything,
/// including the empty string.
pub const MATCH_ALL: &str = ".*";

/// Add `^` and `$` to `source` where they are missing.
///
/// Each end is checked on its own, and the function is idempotent.
///
/// # Example
///
/// ```
/// use kmenu::anchor;
///
/// assert_eq!(anchor("app"), "^app$");
/// assert_eq!(anchor(".*"), "^.*$");
/// assert_eq!(anchor("^x$"), "^x$");
/// assert_eq!(anchor("prod-$"), "^prod-$");
/// assert_eq!(anchor(&anchor("app")), "^app$");
/// ```
#[must_use]
pub fn anchor(source: &str) -> Cow<'_, str> {
    let needs_start = !source.starts_with('^');
    let needs_end = !source.ends_with('$');
    match (needs_start, needs_end) {
        (false, false) => Cow::Borrowed(source),
        (true, false) => Cow::Owned(format!("^{source}")),
        (false, true) => Cow::Owned(format!("{source}$")),
        (true, true) => Cow::Owned(format!("^{source}$")),
    }
}

/// A user-supplied regex together with its compiled, anchored form.
///
/// Uses Rust's `regex` crate, which guarantees linear time matching.
///
/// # Example
///
/// ```
/// use kmenu::Pattern;
///
/// let p = Pattern::compile("prod-.*").unwrap();
/// assert!(p.is_match("prod-pool-node-01"));
/// assert!(!p.is_match("staging-prod-node"));
/// assert_eq!(p.source(), "prod-.*");
/// assert_eq!(p.anchored(), "^prod-.*$");
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Anchor and compile `source`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the anchored pattern is not a valid regex.
    pub fn compile(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&anchor(&source))?;
        Ok(Self { source, regex })
    }

    /// The pattern as the user wrote it, before anchoring.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The anchored expression that was compiled.
    #[must_use]
    pub fn anchored(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns `true` if the pattern matches the entire `text`.
    #[inline]
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Regex(\"{}\")", self.source)
    }
}
