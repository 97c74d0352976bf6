//! Schema Merger integration tests
//!
//! Non-destructive positional merges and the structural-transform fallback.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use tablegraph_bridge::features::schema_merge::{MergeMode, SchemaMerger};
use tablegraph_bridge::{SchemaError, Table, TabularGraph, Value};

fn letters_with(v: Vec<&str>, extra: Option<(&str, Vec<i64>)>) -> TabularGraph {
    let mut nodes = Table::from_columns(vec![("n", vec!["a", "c", "b", "d"]), ("v", v)]).unwrap();
    if let Some((name, values)) = extra {
        nodes = nodes.with_column(name, values).unwrap();
    }
    let edges = Table::from_columns(vec![("a", vec!["c", "d", "a"]), ("b", vec!["d", "a", "b"])])
        .unwrap();
    TabularGraph::from_edges(edges, "a", "b")
        .unwrap()
        .with_nodes(nodes, "n")
        .unwrap()
}

#[test]
fn test_existing_values_win_on_collision() {
    let original = fixture_letters();
    let derived = letters_with(vec!["x", "x", "x", "x"], Some(("rank", vec![4, 3, 2, 1])));

    let (merged, report) = SchemaMerger::merge(&original, &derived, true).unwrap();
    let nodes = merged.nodes().unwrap();
    assert_eq!(nodes.column_names(), vec!["n", "v", "rank"]);
    assert_column(nodes, "v", &["aa", "cc", "bb", "dd"]);
    assert_column(nodes, "rank", &[4, 3, 2, 1]);
    assert_eq!(report.vertices, MergeMode::Positional);
    assert_eq!(report.edges, MergeMode::Positional);
    assert_eq!(report.discarded, vec!["v".to_string()]);
}

#[test]
fn test_identical_columns_are_not_reported() {
    let original = fixture_letters();
    let derived = letters_with(vec!["aa", "cc", "bb", "dd"], None);
    let (merged, report) = SchemaMerger::merge(&original, &derived, true).unwrap();
    assert_eq!(merged, original);
    assert!(report.discarded.is_empty());
}

#[test]
fn test_misaligned_identifiers_replace_vertex_table() {
    let original = fixture_letters();
    let nodes = Table::from_columns(vec![("n", vec!["d", "c", "b", "a"])])
        .unwrap()
        .with_column("rank", vec![1, 2, 3, 4])
        .unwrap();
    let derived = TabularGraph::from_edges(original.edges().clone(), "a", "b")
        .unwrap()
        .with_nodes(nodes.clone(), "n")
        .unwrap();

    let (merged, report) = SchemaMerger::merge(&original, &derived, true).unwrap();
    assert_eq!(report.vertices, MergeMode::Replaced);
    assert_eq!(merged.nodes(), Some(&nodes));

    // Synthesized identifiers are trusted by position
    let (merged, report) = SchemaMerger::merge(&original, &derived, false).unwrap();
    assert_eq!(report.vertices, MergeMode::Positional);
    assert_column(merged.nodes().unwrap(), "n", &["a", "c", "b", "d"]);
    assert_column(merged.nodes().unwrap(), "rank", &[1, 2, 3, 4]);
}

#[test]
fn test_structural_transform_drops_vanished_edge_id() {
    let original = fixture_bipartite_dag();
    let edges = Table::from_columns(vec![("from", vec!["v0"]), ("to", vec!["v1"])]).unwrap();
    let nodes = Table::from_columns(vec![("id", vec!["v0", "v1"])]).unwrap();
    let derived = TabularGraph::from_edges(edges, "from", "to")
        .unwrap()
        .with_nodes(nodes, "id")
        .unwrap();

    let (merged, report) = SchemaMerger::merge(&original, &derived, true).unwrap();
    assert_eq!(report.vertices, MergeMode::Replaced);
    assert_eq!(report.edges, MergeMode::Replaced);
    assert_eq!(merged.edge(), None);
    assert_eq!(merged.edge_count(), 1);
    assert_node_count(&merged, 2);
    assert_eq!((merged.source(), merged.destination()), ("from", "to"));
}

#[test]
fn test_original_without_vertices_takes_derived_ones() {
    let original = fixture_scenario_edges();
    let derived = original.materialize_nodes().unwrap();
    let (merged, report) = SchemaMerger::merge(&original, &derived, true).unwrap();
    assert_eq!(report.vertices, MergeMode::Replaced);
    assert_eq!(merged.node(), Some("_n"));
    assert_node_count(&merged, 5);
    assert_eq!(merged.edges(), original.edges());
}

#[test]
fn test_merge_rejects_endpoints_outside_vertex_table() {
    let original = fixture_letters();
    let nodes = Table::from_columns(vec![("n", vec![0, 1, 2, 3])]).unwrap();
    let edges = Table::from_columns(vec![("a", vec![0]), ("b", vec![1])]).unwrap();
    let derived = TabularGraph::from_edges(edges, "a", "b")
        .unwrap()
        .with_nodes(nodes, "n")
        .unwrap();

    // Vertices line up by position and keep the letters; the edge table does not
    let err = SchemaMerger::merge(&original, &derived, false).unwrap_err();
    assert_eq!(
        err,
        SchemaError::DanglingEdge {
            row: 0,
            column: "a".to_string(),
            value: Value::Int(0),
        }
    );
}
