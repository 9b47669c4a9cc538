//! Generator settings
//!
//! Loaded once per analysis run from `test-generator.config` (JSON) in the
//! project root. A missing file is created with the default document before
//! it is read, so users always have something to edit.
//!
//! ```json
//! {
//!   "excludeTags": ["debug_overlay"],
//!   "globalRules": {
//!     "applyClickIgnore": true,
//!     "useEmptyStrings": true,
//!     "useNegativeNumbers": false,
//!     "testConditionals": true
//!   },
//!   "forNode": [
//!     { "nodeTag": "email_field", "rules": { "useEmptyStrings": false } }
//!   ]
//! }
//! ```

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings file name, relative to the project root
pub const CONFIG_FILE_NAME: &str = "test-generator.config";

/// Root settings document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Test tags never exercised by generated tests
    #[serde(default)]
    pub exclude_tags: Vec<String>,

    /// Rules applied to every node unless overridden
    #[serde(default)]
    pub global_rules: Rules,

    /// Per-tag overrides
    #[serde(default)]
    pub for_node: Vec<NodeSettings>,
}

/// Global rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    /// Also generate the "element is not clicked" case
    #[serde(default = "default_true")]
    pub apply_click_ignore: bool,

    /// Also generate empty strings / "no input" cases
    #[serde(default = "default_true")]
    pub use_empty_strings: bool,

    /// Also generate the negative number sentinel
    #[serde(default)]
    pub use_negative_numbers: bool,

    /// Reserved for conditional-branch coverage; carried but not consumed
    #[serde(default = "default_true")]
    pub test_conditionals: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            apply_click_ignore: true,
            use_empty_strings: true,
            use_negative_numbers: false,
            test_conditionals: true,
        }
    }
}

/// Partial rule set: each present flag replaces the global one for its tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RuleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_click_ignore: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_empty_strings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_negative_numbers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_conditionals: Option<bool>,
}

/// Overrides for one test tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeSettings {
    pub node_tag: String,
    pub rules: RuleOverrides,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exclude_tags: Vec::new(),
            global_rules: Rules::default(),
            for_node: vec![NodeSettings {
                node_tag: "testTag".into(),
                rules: RuleOverrides {
                    apply_click_ignore: Some(true),
                    use_empty_strings: Some(false),
                    use_negative_numbers: Some(false),
                    test_conditionals: Some(true),
                },
            }],
        }
    }
}

impl Settings {
    /// Path of the settings file inside `project_dir`
    pub fn path_in(project_dir: &Path) -> PathBuf {
        project_dir.join(CONFIG_FILE_NAME)
    }

    /// Load settings from `project_dir`, writing the defaults first if the
    /// file does not exist yet
    pub fn load_or_init(project_dir: &Path) -> Result<Self> {
        let path = Self::path_in(project_dir);
        if !path.exists() {
            let json = Settings::default().to_json()?;
            std::fs::write(&path, json).map_err(Error::Io)?;
            info!(path = %path.display(), "wrote default settings");
        }
        Self::load(&path)
    }

    /// Load settings from an explicit file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let settings = Self::from_json(&content).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        for warning in settings.validate() {
            warn!(path = %path.display(), "{}", warning);
        }
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Json)
    }

    /// JSON schema of the settings document
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Settings);
        serde_json::to_string_pretty(&schema).map_err(Error::Json)
    }

    pub fn is_excluded(&self, tag: &str) -> bool {
        self.exclude_tags.iter().any(|t| t == tag)
    }

    /// The first override entry for `tag`
    pub fn overrides_for(&self, tag: &str) -> Option<&RuleOverrides> {
        self.for_node
            .iter()
            .find(|n| n.node_tag == tag)
            .map(|n| &n.rules)
    }

    /// Effective rules for `tag`: each overridden flag replaces the global
    /// flag, every other flag stays global
    pub fn rules_for(&self, tag: &str) -> Rules {
        let global = self.global_rules;
        match self.overrides_for(tag) {
            Some(o) => Rules {
                apply_click_ignore: o.apply_click_ignore.unwrap_or(global.apply_click_ignore),
                use_empty_strings: o.use_empty_strings.unwrap_or(global.use_empty_strings),
                use_negative_numbers: o
                    .use_negative_numbers
                    .unwrap_or(global.use_negative_numbers),
                test_conditionals: o.test_conditionals.unwrap_or(global.test_conditionals),
            },
            None => global,
        }
    }

    /// Non-fatal problems with the document
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut seen = HashSet::new();
        for node in &self.for_node {
            if node.node_tag.trim().is_empty() {
                warnings.push("forNode entry with empty nodeTag".to_string());
                continue;
            }
            if !seen.insert(node.node_tag.as_str()) {
                warnings.push(format!(
                    "Duplicate forNode entry for '{}' (only the first is used)",
                    node.node_tag
                ));
            }
            if self.is_excluded(&node.node_tag) {
                warnings.push(format!(
                    "forNode entry for excluded tag '{}' has no effect",
                    node.node_tag
                ));
            }
        }

        if self.exclude_tags.iter().any(|t| t.trim().is_empty()) {
            warnings.push("excludeTags contains an empty tag".to_string());
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_or_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_init(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(Settings::path_in(dir.path()).exists());

        // Second call reads the file written by the first
        let again = Settings::load_or_init(dir.path()).unwrap();
        assert_eq!(again, settings);
    }

    #[test]
    fn test_load_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            Settings::path_in(dir.path()),
            r#"{ "excludeTags": ["debug"], "globalRules": { "applyClickIgnore": false } }"#,
        )
        .unwrap();

        let settings = Settings::load_or_init(dir.path()).unwrap();
        assert!(settings.is_excluded("debug"));
        assert!(!settings.global_rules.apply_click_ignore);
        // Missing flags take their defaults
        assert!(settings.global_rules.use_empty_strings);
        assert!(settings.for_node.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Settings::path_in(dir.path()), "{ not json").unwrap();
        let err = Settings::load_or_init(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_override_replaces_only_its_flag() {
        let settings = Settings::from_json(
            r#"{
                "globalRules": { "applyClickIgnore": true, "useEmptyStrings": true },
                "forNode": [ { "nodeTag": "email", "rules": { "useEmptyStrings": false } } ]
            }"#,
        )
        .unwrap();

        let email = settings.rules_for("email");
        assert!(!email.use_empty_strings);
        assert!(email.apply_click_ignore);

        let other = settings.rules_for("name");
        assert!(other.use_empty_strings);
    }

    #[test]
    fn test_full_override_document() {
        // Overrides written with every flag still parse
        let settings = Settings::from_json(
            r#"{
                "excludeTags": [],
                "globalRules": { "applyClickIgnore": true, "useEmptyStrings": true,
                                 "useNegativeNumbers": false, "testConditionals": true },
                "forNode": [ { "nodeTag": "submit", "rules": { "applyClickIgnore": false,
                    "useEmptyStrings": true, "useNegativeNumbers": false, "testConditionals": true } } ]
            }"#,
        )
        .unwrap();
        assert!(!settings.rules_for("submit").apply_click_ignore);
    }

    #[test]
    fn test_validate_warnings() {
        let mut settings = Settings::default();
        settings.exclude_tags.push("testTag".into());
        settings.for_node.push(settings.for_node[0].clone());

        let warnings = settings.validate();
        assert!(warnings.iter().any(|w| w.contains("Duplicate")));
        assert!(warnings.iter().any(|w| w.contains("excluded")));
        assert!(Settings::default().validate().is_empty());
    }

    #[test]
    fn test_json_schema_mentions_fields() {
        let schema = Settings::json_schema().unwrap();
        assert!(schema.contains("excludeTags"));
        assert!(schema.contains("globalRules"));
    }
}
