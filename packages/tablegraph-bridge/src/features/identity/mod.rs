//! Identifier Resolver
//!
//! Decides which columns serve as the vertex identifier and the edge endpoint
//! identifiers, on the way into an indexed graph and on the way back out.
//! Resolution never fails: when nothing is bound, reserved default names are
//! used so the resulting tabular graph is always fully addressable.

use tracing::debug;

use crate::config::IdentifierPolicy;
use crate::shared::constants::reserved;
use crate::shared::models::{ElementKind, IndexedGraph, TabularGraph};

/// Resolved identifier column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierScheme {
    pub node: String,
    pub source: String,
    pub destination: String,
    /// `true` when `node` is the reserved name rather than a caller binding
    pub node_is_reserved: bool,
}

impl IdentifierScheme {
    /// Reserved defaults for graphs with no caller binding
    pub fn defaults() -> Self {
        Self {
            node: reserved::NODE.to_string(),
            source: reserved::SOURCE.to_string(),
            destination: reserved::DESTINATION.to_string(),
            node_is_reserved: true,
        }
    }
}

/// Where vertex identifiers of an indexed graph come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexIdSource {
    /// A vertex attribute holds the identifiers
    Attribute(String),
    /// No recognizable attribute; identifiers are the positions themselves
    Positions,
}

impl VertexIdSource {
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::Attribute(name) => Some(name),
            Self::Positions => None,
        }
    }
}

pub struct IdentifierResolver;

impl IdentifierResolver {
    /// Identifier columns of an existing tabular graph.
    ///
    /// Explicit bindings are used unchanged; a missing node binding resolves
    /// to the reserved node column.
    pub fn resolve(graph: &TabularGraph) -> IdentifierScheme {
        let scheme = IdentifierScheme {
            node: graph.node().unwrap_or(reserved::NODE).to_string(),
            source: graph.source().to_string(),
            destination: graph.destination().to_string(),
            node_is_reserved: graph.node().is_none(),
        };
        debug!(
            node = %scheme.node,
            source = %scheme.source,
            destination = %scheme.destination,
            "resolved identifier scheme"
        );
        scheme
    }

    /// Identifier columns for a tabular graph rebuilt from an indexed graph
    pub fn resolve_output(existing: Option<&TabularGraph>) -> IdentifierScheme {
        match existing {
            Some(graph) => Self::resolve(graph),
            None => IdentifierScheme::defaults(),
        }
    }

    /// Find the vertex attribute carrying identifiers.
    ///
    /// Order: the existing node binding, the reserved `_n` attribute, then
    /// (only without an existing graph, under [`IdentifierPolicy::BestGuess`])
    /// a `name` attribute. Otherwise positions are used.
    pub fn locate_vertex_ids(
        graph: &IndexedGraph,
        existing_node: Option<&str>,
        has_existing: bool,
        policy: IdentifierPolicy,
    ) -> VertexIdSource {
        let has = |name: &str| graph.attribute(ElementKind::Vertex, name).is_some();

        if let Some(node) = existing_node {
            if has(node) {
                return VertexIdSource::Attribute(node.to_string());
            }
        }
        if has(reserved::NODE) {
            return VertexIdSource::Attribute(reserved::NODE.to_string());
        }
        if !has_existing && policy == IdentifierPolicy::BestGuess && has(reserved::NAME_ATTR) {
            return VertexIdSource::Attribute(reserved::NAME_ATTR.to_string());
        }
        VertexIdSource::Positions
    }
}
