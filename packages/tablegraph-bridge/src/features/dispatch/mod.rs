//! Algorithm Dispatcher
//!
//! Two uniform entry points over the algorithms capability:
//! - [`compute`]: decorate vertices/edges with a derived attribute, or replace
//!   the graph with a structural transform
//! - [`layout`]: add vertex coordinates, edges unchanged
//!
//! Both look the algorithm up in a closed registry first, so an unknown name
//! fails before any conversion work is done.

mod compute;
mod layout;
pub mod registry;

pub use compute::compute;
pub use layout::layout;
pub use registry::{AlgorithmDescriptor, AlgorithmFamily, AlgorithmRegistry, ResultArity};

use crate::shared::ports::Params;

/// Options for [`compute`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputeOptions {
    /// Result column name (default: the algorithm name)
    pub out_col: Option<String>,
    /// Directedness override
    pub directed: Option<bool>,
    /// Keyword params forwarded to the backend
    pub params: Params,
}

impl ComputeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn out_col(mut self, name: impl Into<String>) -> Self {
        self.out_col = Some(name.into());
        self
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = Some(directed);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Options for [`layout`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOptions {
    pub directed: Option<bool>,
    /// X column (default: configured `layout.x_column`)
    pub x_col: Option<String>,
    /// Y column (default: configured `layout.y_column`)
    pub y_col: Option<String>,
    pub params: Params,
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = Some(directed);
        self
    }

    pub fn columns(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_col = Some(x.into());
        self.y_col = Some(y.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}
