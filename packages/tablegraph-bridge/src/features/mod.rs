//! Feature slices
//!
//! - `identity`: Identifier Resolver
//! - `schema_merge`: Schema Merger
//! - `conversion`: Tabular ⇄ Indexed converters
//! - `dispatch`: algorithm registries and the compute/layout entry points

pub mod conversion;
pub mod dispatch;
pub mod identity;
pub mod schema_merge;
