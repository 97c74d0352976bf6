/*
 * tablegraph-bridge - Tabular ⇄ Indexed property graphs
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Models (Value, Column, Table, TabularGraph, IndexedGraph), ports
 * - features/    : Vertical slices (identity → schema_merge → conversion → dispatch)
 * - adapters/    : Collaborators (petgraph algorithms, Arrow interop)
 * - config/      : Adapter configuration (YAML)
 *
 * Every operation returns a new graph; inputs are never mutated, so graphs
 * can be shared freely across threads.
 */

#![allow(clippy::needless_range_loop)] // Range loop for position indexing
#![allow(clippy::type_complexity)] // Adjacency lists of (neighbor, edge) pairs

pub mod adapters;
pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

use std::sync::Arc;

use tracing::debug;

pub use adapters::PetgraphBackend;
pub use config::{AdapterConfig, IdentifierPolicy};
pub use errors::{BridgeError, Result, SchemaError};
pub use features::conversion::FromIndexedOptions;
pub use features::dispatch::{AlgorithmFamily, AlgorithmRegistry, ComputeOptions, LayoutOptions};
pub use shared::models::{Bindings, Column, DType, ElementKind, IndexedGraph, Table, TabularGraph, Value};
pub use shared::ports::{AlgorithmBackend, AlgorithmOutput, BackendError, Params};

/// Entry point bundling a configuration with an algorithms backend
///
/// # Example
/// ```
/// use tablegraph_bridge::{ComputeOptions, GraphBridge, Table, TabularGraph};
///
/// let edges = Table::from_columns(vec![("s", vec![0, 0, 1]), ("d", vec![1, 2, 2])]).unwrap();
/// let graph = TabularGraph::from_edges(edges, "s", "d").unwrap();
///
/// let bridge = GraphBridge::new();
/// let ranked = bridge.compute(&graph, "pagerank", &ComputeOptions::new()).unwrap();
/// assert!(ranked.nodes().unwrap().has_column("pagerank"));
/// ```
#[derive(Clone)]
pub struct GraphBridge {
    config: AdapterConfig,
    backend: Arc<dyn AlgorithmBackend>,
}

impl Default for GraphBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GraphBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphBridge")
            .field("config", &self.config)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl GraphBridge {
    /// Default configuration over the petgraph backend
    pub fn new() -> Self {
        Self {
            config: AdapterConfig::default(),
            backend: Arc::new(PetgraphBackend::new()),
        }
    }

    pub fn with_config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_backend(mut self, backend: Arc<dyn AlgorithmBackend>) -> Self {
        debug!(backend = backend.name(), "algorithms backend replaced");
        self.backend = backend;
        self
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn backend(&self) -> &dyn AlgorithmBackend {
        self.backend.as_ref()
    }

    /// Tabular → indexed; `directed` falls back to the configured default
    pub fn to_indexed(
        &self,
        graph: &TabularGraph,
        include_vertices: bool,
        directed: Option<bool>,
    ) -> Result<IndexedGraph> {
        let directed = directed.unwrap_or(self.config.default_directed);
        Ok(features::conversion::to_indexed(graph, include_vertices, directed)?)
    }

    /// Indexed → tabular using the configured identifier policy
    pub fn from_indexed(
        &self,
        graph: &IndexedGraph,
        existing: Option<&TabularGraph>,
    ) -> Result<TabularGraph> {
        let options = FromIndexedOptions {
            identifier_policy: self.config.identifier_policy,
            ..FromIndexedOptions::default()
        };
        Ok(features::conversion::from_indexed(graph, existing, &options)?)
    }

    pub fn compute(
        &self,
        graph: &TabularGraph,
        algorithm: &str,
        options: &ComputeOptions,
    ) -> Result<TabularGraph> {
        features::dispatch::compute(graph, algorithm, options, &self.config, self.backend.as_ref())
    }

    pub fn layout(
        &self,
        graph: &TabularGraph,
        algorithm: &str,
        options: &LayoutOptions,
    ) -> Result<TabularGraph> {
        features::dispatch::layout(graph, algorithm, options, &self.config, self.backend.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphBridge>();
        assert_send_sync::<TabularGraph>();
    }

    #[test]
    fn test_to_indexed_uses_configured_directedness() {
        let edges = Table::from_columns(vec![("s", vec![0]), ("d", vec![1])]).unwrap();
        let graph = TabularGraph::from_edges(edges, "s", "d").unwrap();
        let config = AdapterConfig {
            default_directed: false,
            ..AdapterConfig::default()
        };
        let bridge = GraphBridge::new().with_config(config);
        assert!(!bridge.to_indexed(&graph, true, None).unwrap().is_directed());
        assert!(bridge.to_indexed(&graph, true, Some(true)).unwrap().is_directed());
    }
}
