//! Property-based round-trip tests
//!
//! Invariants that must hold for any graph:
//! - Edges-only: endpoint pairs survive, vertex ids are the distinct endpoints
//! - Attributes: every vertex/edge value stays attached to its identifier
//! - Directedness never changes identity

mod common;

use common::*;
use proptest::prelude::*;
use tablegraph_bridge::features::conversion::{from_indexed, to_indexed};
use tablegraph_bridge::{ElementKind, FromIndexedOptions, Table, TabularGraph, Value};

fn edge_list() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..20, 0i64..20), 1..40)
}

/// Shuffled vertex ids `0..n` with one attribute each, plus edges between them
fn vertex_graph() -> impl Strategy<Value = (Vec<i64>, Vec<(usize, usize)>)> {
    (1usize..15).prop_flat_map(|n| {
        let ids = Just((0..n as i64).collect::<Vec<_>>()).prop_shuffle();
        let edges = prop::collection::vec((0..n, 0..n), 0..30);
        (ids, edges)
    })
}

fn edges_only(pairs: &[(i64, i64)]) -> TabularGraph {
    let (s, d): (Vec<i64>, Vec<i64>) = pairs.iter().copied().unzip();
    let weights: Vec<f64> = (0..pairs.len()).map(|i| i as f64 * 0.5).collect();
    let edges = Table::from_columns(vec![("s", s), ("d", d)])
        .unwrap()
        .with_column("w", weights)
        .unwrap();
    TabularGraph::from_edges(edges, "s", "d").unwrap()
}

fn distinct_in_order(pairs: &[(i64, i64)]) -> Vec<Value> {
    let mut seen = Vec::new();
    for value in pairs.iter().map(|p| p.0).chain(pairs.iter().map(|p| p.1)) {
        let value = Value::Int(value);
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

proptest! {
    /// Property: edge pairs and weights survive an edges-only round trip
    #[test]
    fn prop_edges_only_round_trip(pairs in edge_list(), directed in any::<bool>()) {
        let graph = edges_only(&pairs);
        let indexed = to_indexed(&graph, true, directed).unwrap();
        let back = from_indexed(&indexed, None, &FromIndexedOptions::default()).unwrap();

        prop_assert_eq!(edge_pairs(&back), edge_pairs(&graph));
        prop_assert_eq!(column_values(back.edges(), "w"), column_values(graph.edges(), "w"));
        prop_assert_eq!(
            column_values(back.nodes().unwrap(), "_n"),
            distinct_in_order(&pairs)
        );
    }

    /// Property: merging back into the original reproduces its edge table
    #[test]
    fn prop_round_trip_into_existing(pairs in edge_list()) {
        let graph = edges_only(&pairs);
        let indexed = to_indexed(&graph, true, true).unwrap();
        let back = from_indexed(&indexed, Some(&graph), &FromIndexedOptions::default()).unwrap();
        prop_assert_eq!(back.edges(), graph.edges());
    }

    /// Property: vertex attributes stay keyed by identifier in any row order
    #[test]
    fn prop_vertex_attributes_keyed_by_id((ids, edges) in vertex_graph()) {
        let labels: Vec<String> = ids.iter().map(|id| format!("vertex-{id}")).collect();
        let nodes = Table::from_columns(vec![("id", ids.clone())])
            .unwrap()
            .with_column("label", labels)
            .unwrap();
        let (s, d): (Vec<i64>, Vec<i64>) = edges.iter().map(|&(a, b)| (ids[a], ids[b])).unzip();
        let edge_table = Table::from_columns(vec![("s", s), ("d", d)]).unwrap();
        let graph = TabularGraph::from_edges(edge_table, "s", "d")
            .unwrap()
            .with_nodes(nodes, "id")
            .unwrap();

        let indexed = to_indexed(&graph, true, false).unwrap();
        prop_assert_eq!(indexed.vertex_count(), ids.len());
        let back = from_indexed(&indexed, None, &FromIndexedOptions::default()).unwrap();
        prop_assert_eq!(
            keyed_by(back.nodes().unwrap(), "_n", "label"),
            keyed_by(graph.nodes().unwrap(), "id", "label")
        );
        prop_assert_eq!(edge_pairs(&back), edge_pairs(&graph));
    }

    /// Property: directedness only flips the traversal flag
    #[test]
    fn prop_directedness_independent_identity(pairs in edge_list()) {
        let graph = edges_only(&pairs);
        let directed = to_indexed(&graph, true, true).unwrap();
        let undirected = to_indexed(&graph, true, false).unwrap();
        prop_assert_eq!(directed.edges(), undirected.edges());
        prop_assert_eq!(
            directed.attribute(ElementKind::Vertex, "_n"),
            undirected.attribute(ElementKind::Vertex, "_n")
        );
    }
}
