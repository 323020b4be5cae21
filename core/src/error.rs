//! Error types for configuration loading and record decoding.
//!
//! Configuration errors are caught once at load time, never at evaluation
//! time. Fix the configuration and load it again.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which pattern of a condition failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternField {
    /// The condition's `keyPattern`.
    KeyPattern,
    /// The condition's `valuePattern`.
    ValuePattern,
}

impl PatternField {
    /// The configuration field name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyPattern => "keyPattern",
            Self::ValuePattern => "valuePattern",
        }
    }
}

impl fmt::Display for PatternField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while loading, parsing, or validating a menu configuration.
///
/// Validation stops at the first problem; the whole configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("read config {}: {source}", .path.display())]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON/YAML for the schema.
    #[error("parse config ({format}): {message}")]
    Parse {
        /// `"json"` or `"yaml"`.
        format: &'static str,
        /// Deserializer message, including location.
        message: String,
    },

    /// The configuration has no menu items.
    #[error("config: no menu items")]
    NoMenuItems,

    /// A menu item has an empty title.
    #[error("config: menuItems[{index}] has empty title")]
    EmptyTitle {
        /// Index of the menu item.
        index: usize,
    },

    /// A menu item has an empty URL.
    #[error("config: menuItems[{index}] ({title}) has empty url")]
    EmptyUrl {
        /// Index of the menu item.
        index: usize,
        /// Title of the menu item.
        title: String,
    },

    /// A condition has an empty path.
    #[error("config: menuItems[{index}] ({title}) conditions[{condition}] has empty path")]
    EmptyConditionPath {
        /// Index of the menu item.
        index: usize,
        /// Title of the menu item.
        title: String,
        /// Index of the condition within the item.
        condition: usize,
    },

    /// A condition pattern is not a valid regex.
    #[error(
        "config: menuItems[{index}] ({title}) conditions[{condition}] invalid {field} {pattern:?}: {source}"
    )]
    InvalidPattern {
        /// Index of the menu item.
        index: usize,
        /// Title of the menu item.
        title: String,
        /// Index of the condition within the item.
        condition: usize,
        /// Which pattern failed.
        field: PatternField,
        /// The pattern as written, before anchoring.
        pattern: String,
        /// Regex compiler error.
        source: regex::Error,
    },

    /// A template variable has an empty path.
    #[error("config: menuItems[{index}] ({title}) templateVars[{template}] has empty path")]
    EmptyTemplatePath {
        /// Index of the menu item.
        index: usize,
        /// Title of the menu item.
        title: String,
        /// Index of the template variable within the item.
        template: usize,
    },

    /// A template variable has an empty `urlAppend`.
    #[error("config: menuItems[{index}] ({title}) templateVars[{template}] has empty urlAppend")]
    EmptyUrlAppend {
        /// Index of the menu item.
        index: usize,
        /// Title of the menu item.
        title: String,
        /// Index of the template variable within the item.
        template: usize,
    },
}

/// Errors produced while decoding a record document.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The bytes are not valid JSON.
    #[error("decode record: {0}")]
    Json(#[from] serde_json::Error),

    /// The document decoded, but its root is not an object.
    #[error("decode record: root must be an object, found {found}")]
    NotAnObject {
        /// Kind of the root value.
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_locate_the_problem() {
        let err = ConfigError::EmptyUrl {
            index: 2,
            title: "Grafana".into(),
        };
        assert_eq!(err.to_string(), "config: menuItems[2] (Grafana) has empty url");

        let err = ConfigError::EmptyConditionPath {
            index: 0,
            title: "Logs".into(),
            condition: 1,
        };
        assert_eq!(
            err.to_string(),
            "config: menuItems[0] (Logs) conditions[1] has empty path"
        );
    }

    #[test]
    fn test_invalid_pattern_message() {
        let source = regex::Regex::new("^[bad$").unwrap_err();
        let err = ConfigError::InvalidPattern {
            index: 0,
            title: "bad".into(),
            condition: 0,
            field: PatternField::KeyPattern,
            pattern: "[bad".into(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("config: menuItems[0] (bad) conditions[0] invalid keyPattern \"[bad\": "));
    }

    #[test]
    fn test_pattern_field_names() {
        assert_eq!(PatternField::KeyPattern.to_string(), "keyPattern");
        assert_eq!(PatternField::ValuePattern.to_string(), "valuePattern");
    }
}
