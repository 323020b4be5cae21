//! kmenu - Pod-aware dashboard menus
//!
//! A menu is a list of entries (title, description, base URL). Each entry can
//! carry conditions that decide whether it is shown for a given Kubernetes
//! resource, and template variables that copy values from the resource into
//! its URL.
//!
//! # Architecture
//!
//! - [`MenuConfig`] — Serde-deserializable configuration (JSON or YAML)
//! - [`Menu`] — Validated, immutable menu produced by [`MenuConfig::validate`]
//! - [`Record`] — One decoded resource, queried by dot-notation paths
//! - [`FieldValue`] — What a path resolved to: absent, null, map, sequence or scalar
//! - [`Condition`] — Regex check on one field, with implicit anchoring
//! - [`TemplateVar`] — Placeholder substitution into a URL fragment
//!
//! # Key Invariants
//!
//! 1. **Missing → false**: a path that resolves to nothing (or to null) never
//!    matches; `invert` turns that into `true`.
//!
//! 2. **Anchored patterns**: `app` matches the key `app` only, never `apps`.
//!
//! 3. **Validate once**: every regex is compiled at load time. Evaluation
//!    cannot fail, and a [`Menu`] can be shared across threads.
//!
//! # Example
//!
//! ```
//! use kmenu::prelude::*;
//!
//! let menu = Menu::from_json_str(r#"{
//!     "menuItems": [{
//!         "title": "Nginx dashboard",
//!         "description": "Requests per pod",
//!         "url": "https://grafana/d/nginx",
//!         "filters": {"conditions": [
//!             {"path": "metadata.labels", "keyPattern": "app", "valuePattern": "nginx"},
//!             {"path": "metadata.annotations", "keyPattern": "internal\\.skip", "invert": true}
//!         ]},
//!         "templateVars": [
//!             {"path": "metadata.namespace", "urlAppend": "?var-namespace=$VALUE"},
//!             {"path": "metadata.name", "urlAppend": "&var-pod=$VALUE"}
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! let record: Record = r#"{
//!     "metadata": {"name": "nginx-0", "namespace": "web", "labels": {"app": "nginx"}}
//! }"#.parse().unwrap();
//!
//! let rows = menu.rows(Some(&record));
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].url, "https://grafana/d/nginx?var-namespace=web&var-pod=nginx-0");
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod condition;
mod config;
mod error;
mod field_value;
mod menu;
mod path;
mod pattern;
mod record;
mod stringify;
mod template;
mod trace;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use condition::Condition;
pub use field_value::FieldValue;
pub use menu::{Menu, MenuItem, MenuRow};
pub use path::{resolve, FieldPath};
pub use pattern::{anchor, Pattern, MATCH_ALL};
pub use record::Record;
pub use stringify::{format_number, stringify};
pub use template::{fragments, resolve_url, TemplateFragment, TemplateVar, DEFAULT_PLACEHOLDER};

// Config types
pub use config::{ConditionConfig, FiltersConfig, MenuConfig, MenuItemConfig, TemplateVarConfig};

// Errors
pub use error::{ConfigError, PatternField, RecordError};

// Trace types
pub use trace::{ConditionTrace, EntryTrace};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use kmenu::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Core types
        Condition,
        // Config types
        ConditionConfig,
        // Trace types
        ConditionTrace,
        // Errors
        ConfigError,
        EntryTrace,
        FieldPath,
        FieldValue,
        Menu,
        MenuConfig,
        MenuItem,
        MenuItemConfig,
        MenuRow,
        Pattern,
        Record,
        RecordError,
        TemplateVar,
    };
}
