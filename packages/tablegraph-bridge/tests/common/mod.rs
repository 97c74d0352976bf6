//! Common test utilities for tablegraph-bridge
//!
//! Shared graph fixtures, backends and table assertions for the integration
//! tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;
