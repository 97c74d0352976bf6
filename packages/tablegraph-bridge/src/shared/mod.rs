//! Shared module - Common types and utilities
//!
//! Models, reserved names and collaborator ports shared by every feature.

pub mod constants;
pub mod models;
pub mod ports;

// Re-exports for convenience
pub use models::*;
