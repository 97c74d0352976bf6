//! Error types for tablegraph-bridge
//!
//! Provides unified error handling across the crate. Callers get either a
//! fully-formed result or one of these errors; partial results are never
//! returned.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::dispatch::AlgorithmFamily;
use crate::shared::models::{DType, Value};
use crate::shared::ports::BackendError;

/// Main error type for tablegraph-bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Schema violation in a table or graph
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Unknown symbolic algorithm name
    #[error("Unsupported {family} algorithm '{name}'")]
    UnsupportedAlgorithm {
        name: String,
        family: AlgorithmFamily,
    },

    /// The algorithms capability failed while running an operation
    #[error("Computation '{algorithm}' failed: {source}")]
    ComputationFailed {
        algorithm: String,
        #[source]
        source: BackendError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Arrow interop error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl BridgeError {
    /// Create an unsupported-algorithm error
    pub fn unsupported(name: impl Into<String>, family: AlgorithmFamily) -> Self {
        BridgeError::UnsupportedAlgorithm {
            name: name.into(),
            family,
        }
    }

    /// Wrap a backend failure with the algorithm that produced it
    pub fn computation(algorithm: impl Into<String>, source: BackendError) -> Self {
        BridgeError::ComputationFailed {
            algorithm: algorithm.into(),
            source,
        }
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, BridgeError::Schema(_))
    }
}

/// Schema violations: duplicate identifiers, dangling endpoints, reserved-name
/// collisions and malformed tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Column '{column}' not found in {table} table")]
    MissingColumn { column: String, table: &'static str },

    #[error("Duplicate column '{column}' in {table} table")]
    DuplicateColumn { column: String, table: &'static str },

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' mixes {expected} and {found} values")]
    MixedColumnTypes {
        column: String,
        expected: DType,
        found: DType,
    },

    #[error("Duplicate vertex identifier {value} in column '{column}'")]
    DuplicateVertexId { column: String, value: Value },

    #[error("Null identifier in column '{column}' at row {row}")]
    NullIdentifier { column: String, row: usize },

    #[error("Edge at row {row} references vertex {value} (column '{column}') which is not in the vertex table")]
    DanglingEdge {
        row: usize,
        column: String,
        value: Value,
    },

    #[error("Edge {edge} endpoint {endpoint} is out of range for {vertex_count} vertices")]
    EndpointOutOfRange {
        edge: usize,
        endpoint: usize,
        vertex_count: usize,
    },

    #[error("Row {row} is out of range for {len} rows")]
    RowOutOfRange { row: usize, len: usize },

    #[error("Vertex {vertex} is listed more than once")]
    DuplicateVertexPosition { vertex: usize },

    #[error("Reserved name '{name}' collides with a {table} attribute")]
    ReservedNameCollision { name: String, table: &'static str },

    #[error("Source and destination must be different columns, both are '{0}'")]
    SameEndpointColumns(String),

    #[error("Unsupported column type {data_type} for column '{column}'")]
    UnsupportedColumnType { column: String, data_type: String },

    #[error("Value {value} in column '{column}' does not fit a 64-bit integer")]
    IntegerOverflow { column: String, value: String },
}

/// Result type alias for tablegraph-bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
