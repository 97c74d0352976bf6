//! Configuration validation
//!
//! Application code depends on the `Validatable` trait rather than on concrete
//! config types.

use super::adapter_config::AdapterConfig;
use super::error::{ConfigError, ConfigResult};
use crate::features::dispatch::AlgorithmRegistry;
use crate::shared::constants::{reserved, SUPPORTED_CONFIG_VERSIONS};

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

impl Validatable for AdapterConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !SUPPORTED_CONFIG_VERSIONS.contains(&self.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_CONFIG_VERSIONS.to_vec(),
            });
        }

        let x = self.layout.x_column.as_str();
        let y = self.layout.y_column.as_str();
        for (field, value) in [("layout.x_column", x), ("layout.y_column", y)] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "column name must not be empty"));
            }
            if [reserved::NODE, reserved::SOURCE, reserved::DESTINATION].contains(&value) {
                return Err(ConfigError::invalid(
                    field,
                    format!("'{}' is a reserved identifier name", value),
                ));
            }
        }
        if x == y {
            return Err(ConfigError::invalid(
                "layout.y_column",
                format!("x and y columns must differ, both are '{}'", x),
            ));
        }

        for name in self.algorithm_defaults.keys() {
            let known = AlgorithmRegistry::compute().contains(name)
                || AlgorithmRegistry::layout().contains(name);
            if !known {
                let mut candidates = AlgorithmRegistry::compute().names();
                candidates.extend(AlgorithmRegistry::layout().names());
                return Err(ConfigError::unknown_algorithm_with_suggestion(
                    name.as_str(),
                    &candidates,
                ));
            }
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "AdapterConfig"
    }
}
