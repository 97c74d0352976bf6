//! Algorithm registries
//!
//! Two closed, enumerable sets of symbolic names: "compute" operations that
//! decorate or transform a graph, and "layout" operations that position its
//! vertices. Each name maps to a descriptor carrying its result arity,
//! required params and default directedness.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{BridgeError, Result};
use crate::shared::models::ElementKind;
use crate::shared::ports::{AlgorithmOutput, BackendError, Params};

/// Which dispatcher entry point an algorithm belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmFamily {
    Compute,
    Layout,
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compute => f.write_str("compute"),
            Self::Layout => f.write_str("layout"),
        }
    }
}

/// Shape of an algorithm's result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultArity {
    /// One numeric (or boolean) value per vertex
    VertexScalar,
    /// One integer label per vertex (components, communities)
    VertexLabel,
    /// One value per edge
    EdgeScalar,
    /// A structurally transformed graph
    Graph,
    /// One `[x, y]` pair per vertex
    Coordinates,
}

impl ResultArity {
    /// Element the result is attached to, `None` for whole-graph results
    pub fn element(&self) -> Option<ElementKind> {
        match self {
            Self::VertexScalar | Self::VertexLabel | Self::Coordinates => Some(ElementKind::Vertex),
            Self::EdgeScalar => Some(ElementKind::Edge),
            Self::Graph => None,
        }
    }

    /// Does `output` have the variant this arity promises?
    pub fn accepts(&self, output: &AlgorithmOutput) -> bool {
        matches!(
            (self, output),
            (Self::VertexScalar | Self::VertexLabel, AlgorithmOutput::VertexValues(_))
                | (Self::EdgeScalar, AlgorithmOutput::EdgeValues(_))
                | (Self::Graph, AlgorithmOutput::Graph(_))
                | (Self::Coordinates, AlgorithmOutput::Coordinates(_))
        )
    }

    pub fn expected_output(&self) -> &'static str {
        match self {
            Self::VertexScalar | Self::VertexLabel => "vertex values",
            Self::EdgeScalar => "edge values",
            Self::Graph => "graph",
            Self::Coordinates => "coordinates",
        }
    }
}

/// Capability descriptor for one registered algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    pub name: &'static str,
    pub family: AlgorithmFamily,
    pub arity: ResultArity,
    /// Params that must be present after config defaults are applied
    pub required_params: &'static [&'static str],
    /// Directedness the algorithm expects, `None` to follow the caller
    pub directed: Option<bool>,
}

impl AlgorithmDescriptor {
    fn compute(name: &'static str, arity: ResultArity) -> Self {
        Self {
            name,
            family: AlgorithmFamily::Compute,
            arity,
            required_params: &[],
            directed: None,
        }
    }

    fn layout(name: &'static str) -> Self {
        Self {
            name,
            family: AlgorithmFamily::Layout,
            arity: ResultArity::Coordinates,
            required_params: &[],
            directed: None,
        }
    }

    fn requires(mut self, params: &'static [&'static str]) -> Self {
        self.required_params = params;
        self
    }

    fn directed(mut self, directed: bool) -> Self {
        self.directed = Some(directed);
        self
    }

    /// First required param missing from `params`
    pub fn check_params(&self, params: &Params) -> std::result::Result<(), BackendError> {
        match self.required_params.iter().find(|p| !params.contains_key(**p)) {
            Some(missing) => Err(BackendError::MissingParameter(missing.to_string())),
            None => Ok(()),
        }
    }
}

/// Enumerable registry of one algorithm family
#[derive(Debug)]
pub struct AlgorithmRegistry {
    family: AlgorithmFamily,
    descriptors: Vec<AlgorithmDescriptor>,
}

static COMPUTE_REGISTRY: Lazy<AlgorithmRegistry> = Lazy::new(|| {
    use ResultArity::*;

    AlgorithmRegistry {
        family: AlgorithmFamily::Compute,
        descriptors: vec![
            // Centrality
            AlgorithmDescriptor::compute("degree", VertexScalar),
            AlgorithmDescriptor::compute("pagerank", VertexScalar),
            AlgorithmDescriptor::compute("hub_score", VertexScalar),
            AlgorithmDescriptor::compute("authority_score", VertexScalar),
            AlgorithmDescriptor::compute("eigenvector_centrality", VertexScalar).directed(false),
            AlgorithmDescriptor::compute("betweenness", VertexScalar),
            AlgorithmDescriptor::compute("closeness", VertexScalar),
            AlgorithmDescriptor::compute("harmonic_centrality", VertexScalar),
            AlgorithmDescriptor::compute("eccentricity", VertexScalar),
            // Structure
            AlgorithmDescriptor::compute("coreness", VertexScalar).directed(false),
            AlgorithmDescriptor::compute("transitivity_local_undirected", VertexScalar)
                .directed(false),
            AlgorithmDescriptor::compute("articulation_points", VertexScalar).directed(false),
            AlgorithmDescriptor::compute("topological_sorting", VertexScalar).directed(true),
            // Components and communities
            AlgorithmDescriptor::compute("connected_components", VertexLabel).directed(false),
            AlgorithmDescriptor::compute("strongly_connected_components", VertexLabel)
                .directed(true),
            AlgorithmDescriptor::compute("community_label_propagation", VertexLabel)
                .directed(false),
            AlgorithmDescriptor::compute("community_multilevel", VertexLabel).directed(false),
            // Edges
            AlgorithmDescriptor::compute("edge_betweenness", EdgeScalar),
            // Structural transforms
            AlgorithmDescriptor::compute("spanning_tree", Graph).directed(false),
            AlgorithmDescriptor::compute("k_core", Graph)
                .requires(&["k"])
                .directed(false),
            AlgorithmDescriptor::compute("bipartite_projection", Graph)
                .requires(&["types"])
                .directed(false),
        ],
    }
});

static LAYOUT_REGISTRY: Lazy<AlgorithmRegistry> = Lazy::new(|| AlgorithmRegistry {
    family: AlgorithmFamily::Layout,
    descriptors: vec![
        AlgorithmDescriptor::layout("circle"),
        AlgorithmDescriptor::layout("star"),
        AlgorithmDescriptor::layout("grid"),
        AlgorithmDescriptor::layout("random"),
        AlgorithmDescriptor::layout("fruchterman_reingold"),
        AlgorithmDescriptor::layout("bipartite").requires(&["types"]),
        AlgorithmDescriptor::layout("tree").directed(false),
    ],
});

impl AlgorithmRegistry {
    /// Registry of "compute" operations
    pub fn compute() -> &'static AlgorithmRegistry {
        &COMPUTE_REGISTRY
    }

    /// Registry of "layout" operations
    pub fn layout() -> &'static AlgorithmRegistry {
        &LAYOUT_REGISTRY
    }

    pub fn family(&self) -> AlgorithmFamily {
        self.family
    }

    pub fn get(&self, name: &str) -> Option<&AlgorithmDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptor for `name`, or [`BridgeError::UnsupportedAlgorithm`]
    pub fn lookup(&self, name: &str) -> Result<&AlgorithmDescriptor> {
        self.get(name)
            .ok_or_else(|| BridgeError::unsupported(name, self.family))
    }
}
