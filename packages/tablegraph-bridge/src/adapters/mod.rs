//! Adapters - concrete collaborators
//!
//! - `petgraph`: reference implementation of the algorithms capability
//! - `arrow`: tabular engine interop (RecordBatch ⇄ Table)

pub mod arrow;
pub mod petgraph;

pub use self::petgraph::PetgraphBackend;
