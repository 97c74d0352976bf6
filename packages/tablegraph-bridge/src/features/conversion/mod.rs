//! Tabular ⇄ Indexed conversion
//!
//! - [`to_indexed`]: edge/vertex tables → dense positions with attribute arrays
//! - [`from_indexed`]: the reverse, optionally merged into an existing graph
//!
//! Round-tripping preserves every attribute value under its vertex or edge
//! identifier. Identifier column names only round-trip when an existing graph
//! is supplied on the way back.

mod from_indexed;
mod to_indexed;

pub use from_indexed::{from_indexed, FromIndexedOptions};
pub use to_indexed::to_indexed;
