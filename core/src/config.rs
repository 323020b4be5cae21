//! Config types for menu construction.
//!
//! These types mirror the runtime types but are serde-deserializable. They
//! hold patterns as plain strings; [`MenuConfig::validate`] checks required
//! fields, applies defaults and compiles every pattern, producing a
//! [`Menu`].
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type |
//! |-------------|--------------|
//! | [`MenuConfig`] | [`Menu`] |
//! | [`MenuItemConfig`] | [`MenuItem`] |
//! | [`ConditionConfig`] | [`Condition`] |
//! | [`TemplateVarConfig`] | [`TemplateVar`] |
//!
//! # Example document
//!
//! ```json
//! {
//!   "menuItems": [{
//!     "title": "Grafana",
//!     "description": "Pod dashboard",
//!     "url": "https://grafana/d/pods",
//!     "filters": {"conditions": [
//!       {"path": "metadata.labels", "keyPattern": "app", "valuePattern": "nginx"}
//!     ]},
//!     "templateVars": [{"path": "metadata.name", "urlAppend": "?var-pod=$VALUE"}]
//!   }]
//! }
//! ```

use crate::error::{ConfigError, PatternField};
use crate::pattern::MATCH_ALL;
use crate::template::DEFAULT_PLACEHOLDER;
use crate::{Condition, FieldPath, Menu, MenuItem, Pattern, TemplateVar};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Top-level menu configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    /// Menu entries, in display order.
    #[serde(default)]
    pub menu_items: Vec<MenuItemConfig>,
}

/// Configuration for a [`MenuItem`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemConfig {
    /// Title shown in the chooser. Required.
    #[serde(default)]
    pub title: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Base URL. Required.
    #[serde(default)]
    pub url: String,

    /// Conditions gating visibility.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Values appended to the URL.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub template_vars: Vec<TemplateVarConfig>,
}

/// The `filters` block of a menu item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersConfig {
    /// All conditions must hold (logical AND).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionConfig>,
}

/// Configuration for a [`Condition`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionConfig {
    /// Dot-notation path into the record. Required.
    #[serde(default)]
    pub path: String,

    /// Regex for map keys. Defaults to `.*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pattern: Option<String>,

    /// Regex for values. Defaults to `.*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_pattern: Option<String>,

    /// Negate the result.
    #[serde(default)]
    pub invert: bool,
}

/// Configuration for a [`TemplateVar`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVarConfig {
    /// Dot-notation path into the record. Required.
    #[serde(default)]
    pub path: String,

    /// Token replaced in `url_append`. Defaults to `$VALUE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Fragment appended to the URL. Required.
    #[serde(default)]
    pub url_append: String,
}

impl MenuConfig {
    /// Parse a JSON document without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })
    }

    /// Parse a YAML document without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            format: "yaml",
            message: e.to_string(),
        })
    }

    /// Read a configuration file without validating it.
    ///
    /// Files ending in `.json` are parsed as JSON; with the `yaml` feature
    /// anything else is parsed as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        #[cfg(feature = "yaml")]
        {
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if !is_json {
                return Self::from_yaml_str(&content);
            }
        }

        Self::from_json_str(&content)
    }

    /// Check required fields, apply defaults and compile every pattern.
    ///
    /// Stops at the first problem. Nothing is partially loaded.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, located by item index and
    /// title, and by condition or template variable index.
    pub fn validate(&self) -> Result<Menu, ConfigError> {
        if self.menu_items.is_empty() {
            return Err(ConfigError::NoMenuItems);
        }

        let items = self
            .menu_items
            .iter()
            .enumerate()
            .map(|(index, item)| item.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        info!(items = items.len(), "menu configuration validated");
        Ok(Menu::new(items))
    }
}

impl MenuItemConfig {
    fn validate(&self, index: usize) -> Result<MenuItem, ConfigError> {
        if self.title.is_empty() {
            return Err(ConfigError::EmptyTitle { index });
        }
        if self.url.is_empty() {
            return Err(ConfigError::EmptyUrl {
                index,
                title: self.title.clone(),
            });
        }

        let conditions = self
            .filters
            .conditions
            .iter()
            .enumerate()
            .map(|(condition, config)| self.compile_condition(index, condition, config))
            .collect::<Result<Vec<_>, _>>()?;

        let template_vars = self
            .template_vars
            .iter()
            .enumerate()
            .map(|(template, config)| self.compile_template_var(index, template, config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MenuItem::new(
            self.title.as_str(),
            self.description.as_str(),
            self.url.as_str(),
            conditions,
            template_vars,
        ))
    }

    fn compile_condition(
        &self,
        index: usize,
        condition: usize,
        config: &ConditionConfig,
    ) -> Result<Condition, ConfigError> {
        if config.path.is_empty() {
            return Err(ConfigError::EmptyConditionPath {
                index,
                title: self.title.clone(),
                condition,
            });
        }
        let path = checked_path(&config.path, &self.title);

        let compile = |field: PatternField, source: Option<&str>| {
            let source = source.filter(|s| !s.is_empty()).unwrap_or(MATCH_ALL);
            Pattern::compile(source).map_err(|e| ConfigError::InvalidPattern {
                index,
                title: self.title.clone(),
                condition,
                field,
                pattern: source.to_string(),
                source: e,
            })
        };
        let key = compile(PatternField::KeyPattern, config.key_pattern.as_deref())?;
        let value = compile(PatternField::ValuePattern, config.value_pattern.as_deref())?;

        Ok(Condition::new(path, key, value, config.invert))
    }

    fn compile_template_var(
        &self,
        index: usize,
        template: usize,
        config: &TemplateVarConfig,
    ) -> Result<TemplateVar, ConfigError> {
        if config.path.is_empty() {
            return Err(ConfigError::EmptyTemplatePath {
                index,
                title: self.title.clone(),
                template,
            });
        }
        if config.url_append.is_empty() {
            return Err(ConfigError::EmptyUrlAppend {
                index,
                title: self.title.clone(),
                template,
            });
        }
        let placeholder = config
            .placeholder
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PLACEHOLDER);

        Ok(TemplateVar::new(
            checked_path(&config.path, &self.title),
            placeholder,
            config.url_append.as_str(),
        ))
    }
}

/// Parse a path, warning when it can never resolve.
fn checked_path(raw: &str, title: &str) -> FieldPath {
    let path = FieldPath::parse(raw);
    if !path.is_well_formed() {
        warn!(path = raw, item = title, "path has an empty segment and will never resolve");
    }
    path
}

impl TryFrom<MenuConfig> for Menu {
    type Error = ConfigError;

    fn try_from(config: MenuConfig) -> Result<Self, Self::Error> {
        config.validate()
    }
}

impl Menu {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if parsing or validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        MenuConfig::from_json_str(json)?.validate()
    }

    /// Parse and validate a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if parsing or validation fails.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        MenuConfig::from_yaml_str(yaml)?.validate()
    }

    /// Read, parse and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if reading, parsing or validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        MenuConfig::read(path)?.validate()
    }
}
