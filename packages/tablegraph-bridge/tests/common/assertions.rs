//! Custom assertions for table and graph verification

use std::collections::BTreeMap;

use tablegraph_bridge::{Table, TabularGraph, Value};

/// Column values, failing loudly when the column is missing
pub fn column_values(table: &Table, name: &str) -> Vec<Value> {
    table
        .column(name)
        .unwrap_or_else(|| panic!("column '{name}' missing, have {:?}", table.column_names()))
        .values()
        .to_vec()
}

/// `id → value` for one attribute column, independent of row order
pub fn keyed_by(table: &Table, id: &str, attribute: &str) -> BTreeMap<Value, Value> {
    column_values(table, id)
        .into_iter()
        .zip(column_values(table, attribute))
        .collect()
}

/// `(source, destination)` pairs of a graph, in edge order
pub fn edge_pairs(graph: &TabularGraph) -> Vec<(Value, Value)> {
    column_values(graph.edges(), graph.source())
        .into_iter()
        .zip(column_values(graph.edges(), graph.destination()))
        .collect()
}

/// Assert that a table has a column with exactly these values
pub fn assert_column<V: Into<Value> + Clone>(table: &Table, name: &str, expected: &[V]) {
    let expected: Vec<Value> = expected.iter().cloned().map(Into::into).collect();
    pretty_assertions::assert_eq!(column_values(table, name), expected, "column '{}'", name);
}

/// Assert that a graph has a vertex table with `expected` rows
pub fn assert_node_count(graph: &TabularGraph, expected: usize) {
    assert_eq!(
        graph.node_count(),
        Some(expected),
        "Expected {expected} vertices, bindings: {:?}",
        graph.bindings()
    );
}

/// Assert that every value in a column is a finite float
pub fn assert_finite_floats(table: &Table, name: &str) {
    for value in column_values(table, name) {
        let x = value
            .as_f64()
            .unwrap_or_else(|| panic!("column '{name}' holds non-numeric {value}"));
        assert!(x.is_finite(), "column '{name}' holds {x}");
    }
}

/// Assert that every edge endpoint names a row of the vertex table
pub fn assert_endpoints_known(graph: &TabularGraph) {
    let node = graph.node().expect("graph has no node binding");
    let ids = column_values(graph.nodes().expect("graph has no vertex table"), node);
    for (src, dst) in edge_pairs(graph) {
        for endpoint in [src, dst] {
            assert!(ids.contains(&endpoint), "dangling endpoint {endpoint:?} not in {ids:?}");
        }
    }
}
