//! Graph fixtures and test backends

use std::sync::atomic::{AtomicUsize, Ordering};

use tablegraph_bridge::{
    AlgorithmBackend, AlgorithmOutput, BackendError, IndexedGraph, Params, PetgraphBackend, Table,
    TabularGraph, Value,
};

/// Edges `[(0,1),(0,2),(0,3),(1,2),(2,4)]` bound as `s` → `d`, no vertex table
pub fn fixture_scenario_edges() -> TabularGraph {
    let edges = Table::from_columns(vec![("s", vec![0, 0, 0, 1, 2]), ("d", vec![1, 2, 3, 2, 4])])
        .unwrap();
    TabularGraph::from_edges(edges, "s", "d").unwrap()
}

/// Textual identifiers: vertices `n`/`v`, edges bound as `a` → `b`
pub fn fixture_letters() -> TabularGraph {
    let nodes = Table::from_columns(vec![
        ("n", vec!["a", "c", "b", "d"]),
        ("v", vec!["aa", "cc", "bb", "dd"]),
    ])
    .unwrap();
    let edges = Table::from_columns(vec![("a", vec!["c", "d", "a"]), ("b", vec!["d", "a", "b"])])
        .unwrap();
    TabularGraph::from_edges(edges, "a", "b")
        .unwrap()
        .with_nodes(nodes, "n")
        .unwrap()
}

/// Acyclic bipartite graph: even vertices (`kind = false`) point at odd ones.
///
/// Vertex ids `v0..v4` listed in reverse order, so vertex table order and
/// first-appearance order differ. Edges carry a weight `w` and an edge id `eid`.
pub fn fixture_bipartite_dag() -> TabularGraph {
    let nodes = Table::from_columns(vec![("id", vec!["v4", "v3", "v2", "v1", "v0"])])
        .unwrap()
        .with_column("kind", vec![false, true, false, true, false])
        .unwrap()
        .with_column("label", vec!["e", "d", "c", "b", "a"])
        .unwrap();
    let edges = Table::from_columns(vec![
        ("from", vec!["v0", "v0", "v2", "v2", "v4"]),
        ("to", vec!["v1", "v3", "v1", "v3", "v3"]),
    ])
    .unwrap()
    .with_column("w", vec![1.0, 2.0, 3.0, 4.0, 5.0])
    .unwrap()
    .with_column("eid", vec![100, 101, 102, 103, 104])
    .unwrap();
    TabularGraph::from_edges(edges, "from", "to")
        .unwrap()
        .with_nodes(nodes, "id")
        .unwrap()
        .with_edge_id("eid")
        .unwrap()
}

/// Two triangles joined by the bridge `2 - 3`
pub fn fixture_barbell() -> TabularGraph {
    let edges = Table::from_columns(vec![
        ("source", vec![0, 1, 2, 2, 3, 4, 5]),
        ("target", vec![1, 2, 0, 3, 4, 5, 3]),
    ])
    .unwrap();
    TabularGraph::from_edges(edges, "source", "target").unwrap()
}

/// Params for algorithms with required arguments on [`fixture_bipartite_dag`]
pub fn fixture_params_for(algorithm: &str) -> Params {
    let mut params = Params::new();
    match algorithm {
        "k_core" => {
            params.insert("k".to_string(), 1.into());
        }
        "bipartite_projection" | "bipartite" => {
            params.insert("types".to_string(), "kind".into());
        }
        _ => {}
    }
    params
}

/// Delegates to petgraph and counts every call
#[derive(Debug, Default)]
pub struct CountingBackend {
    calls: AtomicUsize,
}

impl CountingBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AlgorithmBackend for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }

    fn run(
        &self,
        graph: &IndexedGraph,
        operation: &str,
        params: &Params,
    ) -> Result<AlgorithmOutput, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        PetgraphBackend.run(graph, operation, params)
    }
}

/// Always returns the same canned output
#[derive(Debug, Clone)]
pub struct FixedBackend(pub AlgorithmOutput);

impl AlgorithmBackend for FixedBackend {
    fn name(&self) -> &str {
        "fixed"
    }

    fn run(
        &self,
        _graph: &IndexedGraph,
        _operation: &str,
        _params: &Params,
    ) -> Result<AlgorithmOutput, BackendError> {
        Ok(self.0.clone())
    }
}

/// One value per vertex, all `Int(i)`
pub fn fixture_vertex_values(count: usize) -> Vec<Value> {
    (0..count).map(Value::from).collect()
}
