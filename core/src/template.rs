//! Template variables — record values substituted into URL fragments
//!
//! Each template variable resolves a path, replaces every occurrence of its
//! placeholder in `url_append` with the value, and appends the result to the
//! entry's base URL. Variables whose path is missing (or null) are skipped:
//! one entry can carry optional enrichments that only apply to some pods.
//!
//! Values are inserted verbatim. No URL escaping is applied.

use crate::{FieldPath, Record};
use tracing::debug;

/// Placeholder used when a template variable does not name one.
pub const DEFAULT_PLACEHOLDER: &str = "$VALUE";

/// A compiled template variable.
///
/// # Example
///
/// ```
/// use kmenu::{FieldPath, Record, TemplateVar};
///
/// let record: Record = r#"{"spec": {"nodeName": "prod-pool-node-01"}}"#.parse().unwrap();
/// let var = TemplateVar::new(FieldPath::parse("spec.nodeName"), "$VALUE", "&node=$VALUE");
/// assert_eq!(var.fragment(&record).unwrap().appended, "&node=prod-pool-node-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVar {
    path: FieldPath,
    placeholder: String,
    url_append: String,
}

/// One resolved template variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFragment {
    /// Path that was resolved.
    pub path: String,
    /// Text of the resolved value.
    pub value: String,
    /// `url_append` with every placeholder replaced.
    pub appended: String,
}

impl TemplateVar {
    /// Create a template variable.
    ///
    /// An empty `placeholder` falls back to [`DEFAULT_PLACEHOLDER`].
    pub fn new(
        path: FieldPath,
        placeholder: impl Into<String>,
        url_append: impl Into<String>,
    ) -> Self {
        let mut placeholder = placeholder.into();
        if placeholder.is_empty() {
            placeholder = DEFAULT_PLACEHOLDER.to_string();
        }
        Self {
            path,
            placeholder,
            url_append: url_append.into(),
        }
    }

    /// Path whose value is substituted.
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Token replaced inside `url_append`.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Fragment appended to the URL.
    #[must_use]
    pub fn url_append(&self) -> &str {
        &self.url_append
    }

    /// Replace every placeholder occurrence in `url_append` with `value`.
    #[must_use]
    pub fn render(&self, value: &str) -> String {
        self.url_append.replace(&self.placeholder, value)
    }

    /// Resolve against `record`, or `None` if the path is missing or null.
    #[must_use]
    pub fn fragment(&self, record: &Record) -> Option<TemplateFragment> {
        let resolved = record.resolve_path(&self.path);
        if resolved.is_missing() {
            debug!(path = %self.path, kind = resolved.type_name(), "template variable skipped");
            return None;
        }
        let value = resolved.to_text();
        Some(TemplateFragment {
            path: self.path.to_string(),
            appended: self.render(&value),
            value: value.into_owned(),
        })
    }
}

/// Every template variable of `vars` that resolves, in declaration order.
///
/// Empty when there is no record.
#[must_use]
pub fn fragments(vars: &[TemplateVar], record: Option<&Record>) -> Vec<TemplateFragment> {
    let Some(record) = record else {
        return Vec::new();
    };
    vars.iter().filter_map(|var| var.fragment(record)).collect()
}

/// Build the final URL: `base` followed by each resolved fragment.
///
/// # Example
///
/// ```
/// use kmenu::{resolve_url, FieldPath, Record, TemplateVar};
///
/// let record: Record = r#"{"metadata": {"name": "web-0"}}"#.parse().unwrap();
/// let vars = [
///     TemplateVar::new(FieldPath::parse("metadata.name"), "$VALUE", "?pod=$VALUE"),
///     TemplateVar::new(FieldPath::parse("spec.nodeName"), "$VALUE", "&node=$VALUE"),
/// ];
/// assert_eq!(resolve_url("https://grafana", &vars, Some(&record)), "https://grafana?pod=web-0");
/// assert_eq!(resolve_url("https://grafana", &vars, None), "https://grafana");
/// ```
#[must_use]
pub fn resolve_url(base: &str, vars: &[TemplateVar], record: Option<&Record>) -> String {
    fragments(vars, record)
        .into_iter()
        .fold(base.to_string(), |mut url, fragment| {
            url.push_str(&fragment.appended);
            url
        })
}
