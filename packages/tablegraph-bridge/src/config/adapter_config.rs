//! Adapter configuration
//!
//! ```yaml
//! version: 1
//! default_directed: true
//! identifier_policy: best_guess
//! layout:
//!   x_column: x
//!   y_column: y
//! algorithm_defaults:
//!   pagerank:
//!     damping: 0.9
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use crate::shared::constants::layout;
use crate::shared::ports::Params;

/// How `from_indexed` finds vertex identifiers when no binding applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierPolicy {
    /// Fall back to a `name` vertex attribute before synthesizing positions
    #[default]
    BestGuess,
    /// Always synthesize identifiers from positions
    AlwaysSynthesize,
}

/// Output columns for layout coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutColumns {
    pub x_column: String,
    pub y_column: String,
}

impl Default for LayoutColumns {
    fn default() -> Self {
        Self {
            x_column: layout::X_COLUMN.to_string(),
            y_column: layout::Y_COLUMN.to_string(),
        }
    }
}

/// Adapter-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Directedness used when neither the caller nor the registry decides
    pub default_directed: bool,

    pub identifier_policy: IdentifierPolicy,

    pub layout: LayoutColumns,

    /// Per-algorithm default params; caller params win key by key
    pub algorithm_defaults: BTreeMap<String, Params>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            default_directed: true,
            identifier_policy: IdentifierPolicy::default(),
            layout: LayoutColumns::default(),
            algorithm_defaults: BTreeMap::new(),
        }
    }
}

impl AdapterConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        if raw.get("version").is_none() {
            return Err(ConfigError::MissingVersion);
        }
        let config: AdapterConfig = serde_yaml::from_value(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Configured defaults overlaid with caller params
    pub fn params_for(&self, algorithm: &str, overrides: &Params) -> Params {
        let mut merged = self
            .algorithm_defaults
            .get(algorithm)
            .cloned()
            .unwrap_or_default();
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = AdapterConfig {
            default_directed: false,
            ..AdapterConfig::default()
        };
        config
            .algorithm_defaults
            .insert("pagerank".to_string(), json!({"damping": 0.9}).as_object().cloned().unwrap());

        let yaml = config.to_yaml_string().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("default_directed: false"));
        assert!(yaml.contains("identifier_policy: best_guess"));

        let loaded = AdapterConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
identifier_policy: always_synthesize
layout:
  x_column: px
algorithm_defaults:
  community_label_propagation:
    max_iterations: 10
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = AdapterConfig::from_yaml_file(temp_file.path()).unwrap();
        assert_eq!(config.identifier_policy, IdentifierPolicy::AlwaysSynthesize);
        assert_eq!(config.layout.x_column, "px");
        assert_eq!(config.layout.y_column, "y");
        assert!(config.default_directed);
        assert_eq!(
            config.algorithm_defaults["community_label_propagation"]["max_iterations"],
            json!(10)
        );
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = AdapterConfig::from_yaml_str("default_directed: false\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = AdapterConfig::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field() {
        let result = AdapterConfig::from_yaml_str("version: 1\ndirected_default: true\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_params_for_overlays_caller_params() {
        let mut config = AdapterConfig::default();
        config.algorithm_defaults.insert(
            "pagerank".to_string(),
            json!({"damping": 0.9, "max_iterations": 50}).as_object().cloned().unwrap(),
        );
        let caller = json!({"damping": 0.5}).as_object().cloned().unwrap();

        let params = config.params_for("pagerank", &caller);
        assert_eq!(params["damping"], json!(0.5));
        assert_eq!(params["max_iterations"], json!(50));
        assert!(config.params_for("betweenness", &caller).contains_key("damping"));
    }
}
