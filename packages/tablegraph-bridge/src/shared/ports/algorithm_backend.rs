//! Algorithms capability port
//!
//! The graph-algorithms library is an opaque collaborator: it receives an
//! [`IndexedGraph`] plus a symbolic operation name and JSON parameters, and
//! returns per-vertex values, per-edge values, coordinates, or a transformed
//! graph. Graph construction and attribute access (`build`, `get_attribute`,
//! `set_attribute`) are methods on [`IndexedGraph`] itself.

use thiserror::Error;

use crate::shared::models::{IndexedGraph, Value};

/// Keyword parameters forwarded verbatim to the backend
pub type Params = serde_json::Map<String, serde_json::Value>;

/// What an operation produced
#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmOutput {
    /// One value per vertex position
    VertexValues(Vec<Value>),
    /// One value per edge position
    EdgeValues(Vec<Value>),
    /// One `[x, y]` pair per vertex position
    Coordinates(Vec<[f64; 2]>),
    /// A structurally transformed graph
    Graph(IndexedGraph),
}

impl AlgorithmOutput {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::VertexValues(_) => "vertex values",
            Self::EdgeValues(_) => "edge values",
            Self::Coordinates(_) => "coordinates",
            Self::Graph(_) => "graph",
        }
    }
}

/// Failures raised by an algorithms backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Operation requires a {required} graph")]
    UnsupportedDirectedness { required: &'static str },

    #[error("Graph contains a cycle through vertex {0}")]
    Cycle(usize),

    #[error("Did not converge after {0} iterations")]
    NotConverged(usize),

    #[error("Derived graph is invalid: {0}")]
    InvalidGraph(String),

    #[error("Backend returned {found}, expected {expected}")]
    UnexpectedOutput {
        expected: String,
        found: String,
    },
}

impl BackendError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        BackendError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Graph-algorithms library capability
///
/// Implementations must be pure with respect to their inputs: the graph is
/// borrowed immutably and results are returned by value.
pub trait AlgorithmBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Run a named operation over an indexed graph
    fn run(
        &self,
        graph: &IndexedGraph,
        operation: &str,
        params: &Params,
    ) -> Result<AlgorithmOutput, BackendError>;
}
