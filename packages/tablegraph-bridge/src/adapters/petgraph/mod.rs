//! petgraph-backed algorithms capability
//!
//! [`PetgraphBackend`] implements every name in the compute and layout
//! registries. Each call builds a short-lived [`GraphView`] over the indexed
//! graph: a `DiGraph` whose node weights are vertex positions and whose edge
//! weights are edge positions, plus adjacency lists in the traversal
//! direction the graph's `directed` flag selects.

mod centrality;
mod community;
mod layout;
pub(crate) mod params;
mod structure;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use tracing::debug;

use crate::shared::models::IndexedGraph;
use crate::shared::ports::{AlgorithmBackend, AlgorithmOutput, BackendError, Params};

/// Reference backend over `petgraph`
#[derive(Debug, Clone, Copy, Default)]
pub struct PetgraphBackend;

impl PetgraphBackend {
    pub fn new() -> Self {
        Self
    }
}

impl AlgorithmBackend for PetgraphBackend {
    fn name(&self) -> &str {
        "petgraph"
    }

    fn run(
        &self,
        graph: &IndexedGraph,
        operation: &str,
        params: &Params,
    ) -> Result<AlgorithmOutput, BackendError> {
        let view = GraphView::new(graph);
        debug!(
            operation,
            vertices = view.vertex_count(),
            edges = view.edge_count(),
            directed = view.is_directed(),
            "petgraph backend run"
        );

        use AlgorithmOutput::{Coordinates, EdgeValues, Graph, VertexValues};
        let output = match operation {
            // Centrality
            "degree" => VertexValues(centrality::degree(&view, params)?),
            "pagerank" => VertexValues(centrality::pagerank(&view, params)?),
            "hub_score" => VertexValues(centrality::hits(&view, params)?.0),
            "authority_score" => VertexValues(centrality::hits(&view, params)?.1),
            "eigenvector_centrality" => {
                VertexValues(centrality::eigenvector_centrality(&view, params)?)
            }
            "betweenness" => VertexValues(centrality::betweenness(&view)),
            "closeness" => VertexValues(centrality::closeness(&view)),
            "harmonic_centrality" => VertexValues(centrality::harmonic_centrality(&view)),
            "eccentricity" => VertexValues(centrality::eccentricity(&view)),
            "edge_betweenness" => EdgeValues(centrality::edge_betweenness(&view)),
            // Structure
            "coreness" => VertexValues(structure::coreness_values(&view)),
            "transitivity_local_undirected" => VertexValues(structure::local_transitivity(&view)),
            "articulation_points" => VertexValues(structure::articulation_points(&view)),
            "topological_sorting" => VertexValues(structure::topological_rank(&view)?),
            "spanning_tree" => Graph(structure::spanning_tree(graph, &view, params)?),
            "k_core" => Graph(structure::k_core(graph, &view, params)?),
            "bipartite_projection" => Graph(structure::bipartite_projection(graph, &view, params)?),
            // Components and communities
            "connected_components" => VertexValues(community::connected_components(&view)),
            "strongly_connected_components" => {
                VertexValues(community::strongly_connected_components(&view))
            }
            "community_label_propagation" => {
                VertexValues(community::label_propagation(graph, &view, params)?)
            }
            "community_multilevel" => VertexValues(community::multilevel(graph, &view, params)?),
            // Layouts
            "circle" => Coordinates(layout::circle(&view)),
            "star" => Coordinates(layout::star(&view, params)?),
            "grid" => Coordinates(layout::grid(&view, params)?),
            "random" => Coordinates(layout::random(&view, params)?),
            "fruchterman_reingold" => Coordinates(layout::fruchterman_reingold(&view, params)?),
            "bipartite" => Coordinates(layout::bipartite(graph, &view, params)?),
            "tree" => Coordinates(layout::tree(&view, params)?),
            other => return Err(BackendError::UnknownOperation(other.to_string())),
        };
        Ok(output)
    }
}

/// Traversal view over an indexed graph
pub(crate) struct GraphView {
    graph: DiGraph<usize, usize>,
    directed: bool,
    /// `(neighbor, edge)` pairs in traversal direction
    out_adj: Vec<Vec<(usize, usize)>>,
    /// `(neighbor, edge)` pairs against traversal direction
    in_adj: Vec<Vec<(usize, usize)>>,
}

impl GraphView {
    pub(crate) fn new(indexed: &IndexedGraph) -> Self {
        let n = indexed.vertex_count();
        let mut graph = DiGraph::with_capacity(n, indexed.edge_count());
        for v in 0..n {
            graph.add_node(v);
        }
        for (e, &(src, dst)) in indexed.edges().iter().enumerate() {
            graph.add_edge(NodeIndex::new(src), NodeIndex::new(dst), e);
        }

        let directed = indexed.is_directed();
        let mut out_adj = vec![Vec::new(); n];
        let mut in_adj = vec![Vec::new(); n];
        for (e, &(src, dst)) in indexed.edges().iter().enumerate() {
            out_adj[src].push((dst, e));
            in_adj[dst].push((src, e));
            if !directed && src != dst {
                out_adj[dst].push((src, e));
                in_adj[src].push((dst, e));
            }
        }

        Self {
            graph,
            directed,
            out_adj,
            in_adj,
        }
    }

    pub(crate) fn graph(&self) -> &DiGraph<usize, usize> {
        &self.graph
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn is_directed(&self) -> bool {
        self.directed
    }

    /// Endpoints of every edge, in edge order
    pub(crate) fn endpoints(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph
            .raw_edges()
            .iter()
            .map(|e| (e.source().index(), e.target().index()))
    }

    /// Successors (all neighbors when undirected), with the edge used
    pub(crate) fn out_edges(&self, v: usize) -> &[(usize, usize)] {
        &self.out_adj[v]
    }

    /// Predecessors (all neighbors when undirected), with the edge used
    pub(crate) fn in_edges(&self, v: usize) -> &[(usize, usize)] {
        &self.in_adj[v]
    }

    /// Neighbors ignoring direction, without duplicates or self-loops, sorted
    pub(crate) fn simple_neighbors(&self, v: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(v), Direction::Outgoing)
            .chain(
                self.graph
                    .neighbors_directed(NodeIndex::new(v), Direction::Incoming),
            )
            .map(|n| n.index())
            .filter(|&n| n != v)
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// [`simple_neighbors`](Self::simple_neighbors) for every vertex
    pub(crate) fn simple_adjacency(&self) -> Vec<Vec<usize>> {
        (0..self.vertex_count())
            .map(|v| self.simple_neighbors(v))
            .collect()
    }
}
