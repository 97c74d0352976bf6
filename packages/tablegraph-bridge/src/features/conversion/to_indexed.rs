//! Tabular → Indexed conversion
//!
//! Position assignment is deterministic:
//! - with a vertex table, vertex `i` is row `i` of that table;
//! - without one, vertices are numbered in first-appearance order over the
//!   source column, then the destination column.
//!
//! Edge `i` is always row `i` of the edge table.

use ahash::AHashMap;
use tracing::debug;

use crate::errors::SchemaError;
use crate::features::identity::IdentifierResolver;
use crate::shared::constants::reserved;
use crate::shared::models::{
    endpoint_values_in_order, index_vertex_ids, Column, ElementKind, IndexedGraph, TabularGraph,
    Value,
};

/// Build an indexed graph from a tabular one.
///
/// The vertex identifier of every position is stored as the reserved `_n`
/// vertex attribute. Non-identifier vertex columns become vertex attributes
/// only when `include_vertices` is set; all non-endpoint edge columns become
/// edge attributes.
pub fn to_indexed(
    graph: &TabularGraph,
    include_vertices: bool,
    directed: bool,
) -> Result<IndexedGraph, SchemaError> {
    let scheme = IdentifierResolver::resolve(graph);

    let (ids, index) = match graph.nodes() {
        Some(nodes) => {
            let column = nodes.require_column(&scheme.node, "vertex")?;
            let index = index_vertex_ids(column, &scheme.node)?;
            (column.values().to_vec(), index)
        }
        None => {
            let ids = endpoint_values_in_order(graph.edges(), &scheme.source, &scheme.destination)?;
            let index = ids
                .iter()
                .enumerate()
                .map(|(pos, id)| (id.clone(), pos))
                .collect::<AHashMap<Value, usize>>();
            (ids, index)
        }
    };

    let edges_table = graph.edges();
    let sources = edges_table.require_column(&scheme.source, "edge")?;
    let destinations = edges_table.require_column(&scheme.destination, "edge")?;
    let mut edges = Vec::with_capacity(edges_table.num_rows());
    for row in 0..edges_table.num_rows() {
        let src = translate(sources, &scheme.source, row, &index)?;
        let dst = translate(destinations, &scheme.destination, row, &index)?;
        edges.push((src, dst));
    }

    let mut indexed = IndexedGraph::new(ids.len(), edges, directed)?;
    indexed.set_attribute(
        ElementKind::Vertex,
        reserved::NODE,
        Column::new(reserved::NODE, ids)?,
    )?;

    if include_vertices {
        if let Some(nodes) = graph.nodes() {
            for (name, column) in nodes.columns() {
                if name == scheme.node {
                    continue;
                }
                if name == reserved::NODE {
                    return Err(SchemaError::ReservedNameCollision {
                        name: name.to_string(),
                        table: "vertex",
                    });
                }
                indexed.set_attribute(ElementKind::Vertex, name, column.clone())?;
            }
        }
    }

    for (name, column) in edges_table.columns() {
        if name == scheme.source || name == scheme.destination {
            continue;
        }
        indexed.set_attribute(ElementKind::Edge, name, column.clone())?;
    }

    debug!(
        vertices = indexed.vertex_count(),
        edges = indexed.edge_count(),
        directed,
        include_vertices,
        "converted tabular graph to indexed"
    );
    Ok(indexed)
}

fn translate(
    column: &Column,
    name: &str,
    row: usize,
    index: &AHashMap<Value, usize>,
) -> Result<usize, SchemaError> {
    let value = column.get(row).unwrap_or(&Value::Null);
    if value.is_null() {
        return Err(SchemaError::NullIdentifier {
            column: name.to_string(),
            row,
        });
    }
    index
        .get(value)
        .copied()
        .ok_or_else(|| SchemaError::DanglingEdge {
            row,
            column: name.to_string(),
            value: value.clone(),
        })
}
