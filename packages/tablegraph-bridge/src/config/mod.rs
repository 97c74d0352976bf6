//! Configuration System
//!
//! A single [`AdapterConfig`] carries the adapter-wide policy knobs:
//! default directedness, identifier recognition policy, layout output columns
//! and per-algorithm default params. It can be built in code or loaded from a
//! versioned YAML document.
//!
//! # Examples
//!
//! ```rust
//! use tablegraph_bridge::config::{AdapterConfig, IdentifierPolicy};
//!
//! let config = AdapterConfig::from_yaml_str("version: 1\nidentifier_policy: always_synthesize\n")?;
//! assert_eq!(config.identifier_policy, IdentifierPolicy::AlwaysSynthesize);
//! # Ok::<(), tablegraph_bridge::config::ConfigError>(())
//! ```

pub mod adapter_config;
pub mod error;
pub mod validation;

// Re-exports
pub use adapter_config::{AdapterConfig, IdentifierPolicy, LayoutColumns};
pub use error::{ConfigError, ConfigResult};
pub use validation::Validatable;
