//! Menu — The validated configuration and the per-record filtering pass
//!
//! A [`Menu`] is only produced by configuration validation, so every
//! condition it holds is already compiled. It is immutable and `Send + Sync`;
//! one menu can be evaluated against any number of records.
//!
//! # No record
//!
//! When no record could be obtained, entries with conditions are hidden and
//! entries without conditions are shown. Template variables contribute
//! nothing, so URLs are the configured base URLs.

use crate::template::{self, TemplateFragment};
use crate::trace::{ConditionTrace, EntryTrace};
use crate::{Condition, Record, TemplateVar};
use tracing::debug;

/// A compiled menu entry.
#[derive(Debug, Clone)]
pub struct MenuItem {
    title: String,
    description: String,
    url: String,
    conditions: Vec<Condition>,
    template_vars: Vec<TemplateVar>,
}

impl MenuItem {
    /// Create a menu entry from compiled parts.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        conditions: Vec<Condition>,
        template_vars: Vec<TemplateVar>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            conditions,
            template_vars,
        }
    }

    /// Entry title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Entry description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Base URL, before template variables.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Conditions, all of which must hold.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Template variables, in declaration order.
    #[must_use]
    pub fn template_vars(&self) -> &[TemplateVar] {
        &self.template_vars
    }

    /// Returns `true` if every condition holds for `record`.
    ///
    /// Short-circuits on the first failing condition. No conditions means
    /// the entry always matches; with no record, any condition hides it.
    pub fn matches(&self, record: Option<&Record>) -> bool {
        match record {
            Some(record) => self.conditions.iter().all(|c| c.evaluate(record)),
            None => self.conditions.is_empty(),
        }
    }

    /// The entry URL with every resolvable template variable appended.
    #[must_use]
    pub fn resolve_url(&self, record: Option<&Record>) -> String {
        template::resolve_url(&self.url, &self.template_vars, record)
    }

    /// The template variables that resolve for `record`.
    #[must_use]
    pub fn fragments(&self, record: Option<&Record>) -> Vec<TemplateFragment> {
        template::fragments(&self.template_vars, record)
    }

    /// Evaluate every condition (no short-circuit) and report the results.
    #[must_use]
    pub fn explain(&self, record: Option<&Record>) -> EntryTrace {
        let conditions: Vec<ConditionTrace> = match record {
            Some(record) => self
                .conditions
                .iter()
                .map(|c| c.evaluate_with_trace(record))
                .collect(),
            None => Vec::new(),
        };
        let matched = match record {
            Some(_) => conditions.iter().all(|c| c.matched),
            None => self.conditions.is_empty(),
        };
        EntryTrace {
            title: self.title.clone(),
            matched,
            has_record: record.is_some(),
            condition_count: self.conditions.len(),
            conditions,
        }
    }
}

/// A visible entry with its URL resolved, ready for a chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    /// Entry title.
    pub title: String,
    /// Entry description.
    pub description: String,
    /// Fully resolved URL.
    pub url: String,
}

/// A validated menu configuration.
///
/// # Example
///
/// ```
/// use kmenu::{Menu, Record};
///
/// let menu = Menu::from_json_str(r#"{
///     "menuItems": [
///         {"title": "Home", "url": "https://home"},
///         {
///             "title": "Nginx",
///             "url": "https://grafana/nginx",
///             "filters": {"conditions": [
///                 {"path": "metadata.labels", "keyPattern": "app", "valuePattern": "nginx"}
///             ]},
///             "templateVars": [{"path": "metadata.name", "urlAppend": "?pod=$VALUE"}]
///         }
///     ]
/// }"#).unwrap();
///
/// let record: Record = r#"{"metadata": {"name": "web-0", "labels": {"app": "nginx"}}}"#
///     .parse()
///     .unwrap();
///
/// let rows = menu.rows(Some(&record));
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].url, "https://grafana/nginx?pod=web-0");
///
/// // Without a record only unconditioned entries remain.
/// assert_eq!(menu.rows(None).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Build a menu from compiled entries.
    ///
    /// Prefer [`MenuConfig::validate`](crate::MenuConfig::validate), which
    /// also checks required fields.
    #[must_use]
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// All entries, in configuration order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Number of configured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the menu has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries visible for `record`, in configuration order.
    #[must_use]
    pub fn filter(&self, record: Option<&Record>) -> Vec<&MenuItem> {
        let visible: Vec<&MenuItem> = self
            .items
            .iter()
            .filter(|item| item.matches(record))
            .collect();
        debug!(
            total = self.items.len(),
            visible = visible.len(),
            has_record = record.is_some(),
            "menu filtered"
        );
        visible
    }

    /// Visible entries with URLs resolved.
    #[must_use]
    pub fn rows(&self, record: Option<&Record>) -> Vec<MenuRow> {
        self.filter(record)
            .into_iter()
            .map(|item| MenuRow {
                title: item.title.clone(),
                description: item.description.clone(),
                url: item.resolve_url(record),
            })
            .collect()
    }

    /// Explain every entry against `record`.
    #[must_use]
    pub fn explain(&self, record: Option<&Record>) -> Vec<EntryTrace> {
        self.items.iter().map(|item| item.explain(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldPath, Pattern};

    fn cond(path: &str, key: &str, value: &str, invert: bool) -> Condition {
        Condition::new(
            FieldPath::parse(path),
            Pattern::compile(key).unwrap(),
            Pattern::compile(value).unwrap(),
            invert,
        )
    }

    fn item(title: &str, conditions: Vec<Condition>) -> MenuItem {
        MenuItem::new(title, "", format!("https://{title}"), conditions, Vec::new())
    }

    fn record() -> Record {
        r#"{
            "metadata": {"labels": {"app": "nginx", "env": "production"}},
            "status": {"phase": "Running"}
        }"#
        .parse()
        .unwrap()
    }

    #[test]
    fn test_and_semantics() {
        let r = record();
        let c1 = cond("metadata.labels", "app", "nginx", false);
        let c2 = cond("status.phase", ".*", "Running", false);
        let c3 = cond("status.phase", ".*", "Pending", false);

        assert!(item("both", vec![c1.clone(), c2.clone()]).matches(Some(&r)));
        assert!(!item("one-fails", vec![c1, c3.clone()]).matches(Some(&r)));
        assert!(!item("other-fails", vec![c3, c2]).matches(Some(&r)));
    }

    #[test]
    fn test_no_conditions_always_match() {
        let r = record();
        assert!(item("any", Vec::new()).matches(Some(&r)));
        assert!(item("any", Vec::new()).matches(None));
    }

    #[test]
    fn test_no_record_hides_conditioned_entries() {
        // Even an inverted condition needs a record to pass.
        let inverted = cond("metadata.annotations", "skip", ".*", true);
        assert!(!item("guarded", vec![inverted]).matches(None));
    }

    #[test]
    fn test_filter_keeps_order() {
        let menu = Menu::new(vec![
            item("a", Vec::new()),
            item("b", vec![cond("status.phase", ".*", "Pending", false)]),
            item("c", vec![cond("status.phase", ".*", "Running", false)]),
            item("d", Vec::new()),
        ]);
        let r = record();
        let titles: Vec<&str> = menu.filter(Some(&r)).iter().map(|i| i.title()).collect();
        assert_eq!(titles, ["a", "c", "d"]);

        let titles: Vec<&str> = menu.filter(None).iter().map(|i| i.title()).collect();
        assert_eq!(titles, ["a", "d"]);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let menu = Menu::new(vec![item("b", vec![cond("nope", ".*", ".*", false)])]);
        assert!(menu.rows(Some(&record())).is_empty());
    }

    #[test]
    fn test_explain_matches_evaluate() {
        let r = record();
        let entry = item(
            "mixed",
            vec![
                cond("status.phase", ".*", "Pending", false),
                cond("metadata.labels", "app", "nginx", false),
            ],
        );
        let trace = entry.explain(Some(&r));
        assert_eq!(trace.matched, entry.matches(Some(&r)));
        // No short-circuit: both conditions are reported.
        assert_eq!(trace.conditions.len(), 2);
        assert!(!trace.conditions[0].matched);
        assert!(trace.conditions[1].matched);

        let trace = entry.explain(None);
        assert!(!trace.matched);
        assert!(!trace.has_record);
        assert!(trace.conditions.is_empty());
        assert_eq!(trace.condition_count, 2);
    }

    #[test]
    fn test_explain_without_record_renders_skipped_conditions() {
        let guarded = item("Guarded", vec![cond("metadata.labels", "app", ".*", false)]);
        assert_eq!(
            guarded.explain(None).to_string(),
            "Guarded — hidden (no record; 1 condition(s) not evaluated)"
        );

        let open = item("Home", Vec::new());
        assert_eq!(open.explain(None).to_string(), "Home — shown (no conditions)");
    }

    #[test]
    fn test_menu_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Menu>();
    }
}
