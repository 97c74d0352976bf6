//! Tabular property graph: an edge table, an optional vertex table, and the
//! column bindings that say which columns hold identifiers.

use ahash::{AHashMap, AHashSet};

use super::column::Column;
use super::table::Table;
use super::value::Value;
use crate::errors::SchemaError;
use crate::shared::constants::reserved;

/// Which columns hold identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    /// Edge source column
    pub source: String,
    /// Edge destination column
    pub destination: String,
    /// Vertex identifier column (`None` when no vertex table is bound)
    pub node: Option<String>,
    /// Optional edge identifier column
    pub edge: Option<String>,
}

impl Bindings {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            node: None,
            edge: None,
        }
    }
}

/// Graph expressed as two tables with bound identifier columns
///
/// Invariants (checked on construction):
/// - the bound source/destination columns exist in the edge table
/// - when a vertex table is bound, its identifier column exists and holds
///   unique, non-null values
#[derive(Debug, Clone, PartialEq)]
pub struct TabularGraph {
    edges: Table,
    nodes: Option<Table>,
    bindings: Bindings,
}

impl TabularGraph {
    /// Bind an edge table by its source and destination columns
    pub fn from_edges(edges: Table, source: &str, destination: &str) -> Result<Self, SchemaError> {
        if source == destination {
            return Err(SchemaError::SameEndpointColumns(source.to_string()));
        }
        edges.require_column(source, "edge")?;
        edges.require_column(destination, "edge")?;
        Ok(Self {
            edges,
            nodes: None,
            bindings: Bindings::new(source, destination),
        })
    }

    /// Bind a vertex table by its identifier column
    pub fn with_nodes(mut self, nodes: Table, node: &str) -> Result<Self, SchemaError> {
        let ids = nodes.require_column(node, "vertex")?;
        index_vertex_ids(ids, node)?;
        self.nodes = Some(nodes);
        self.bindings.node = Some(node.to_string());
        Ok(self)
    }

    /// Bind an edge identifier column
    pub fn with_edge_id(mut self, edge: &str) -> Result<Self, SchemaError> {
        self.edges.require_column(edge, "edge")?;
        self.bindings.edge = Some(edge.to_string());
        Ok(self)
    }

    /// Drop the vertex table and its binding
    pub fn without_nodes(mut self) -> Self {
        self.nodes = None;
        self.bindings.node = None;
        self
    }

    /// Assemble already-validated parts
    pub(crate) fn from_parts(edges: Table, nodes: Option<Table>, bindings: Bindings) -> Self {
        Self {
            edges,
            nodes,
            bindings,
        }
    }

    pub fn edges(&self) -> &Table {
        &self.edges
    }

    pub fn nodes(&self) -> Option<&Table> {
        self.nodes.as_ref()
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn source(&self) -> &str {
        &self.bindings.source
    }

    pub fn destination(&self) -> &str {
        &self.bindings.destination
    }

    pub fn node(&self) -> Option<&str> {
        self.bindings.node.as_deref()
    }

    pub fn edge(&self) -> Option<&str> {
        self.bindings.edge.as_deref()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.num_rows()
    }

    pub fn node_count(&self) -> Option<usize> {
        self.nodes.as_ref().map(Table::num_rows)
    }

    /// Synthesize a vertex table from the distinct endpoint values.
    ///
    /// Identifiers are listed in first-appearance order over the source
    /// column, then the destination column, under the reserved `_n` column.
    /// A graph that already has a vertex table is returned unchanged.
    pub fn materialize_nodes(&self) -> Result<Self, SchemaError> {
        if self.nodes.is_some() {
            return Ok(self.clone());
        }
        let ids = endpoint_values_in_order(&self.edges, self.source(), self.destination())?;
        let mut nodes = Table::new();
        nodes.push_column(reserved::NODE, Column::new(reserved::NODE, ids)?)?;
        let mut graph = self.clone();
        graph.nodes = Some(nodes);
        graph.bindings.node = Some(reserved::NODE.to_string());
        Ok(graph)
    }
}

/// Map each vertex identifier to its row, rejecting nulls and duplicates
pub(crate) fn index_vertex_ids(ids: &Column, column: &str) -> Result<AHashMap<Value, usize>, SchemaError> {
    let mut index = AHashMap::with_capacity(ids.len());
    for (row, value) in ids.iter().enumerate() {
        if value.is_null() {
            return Err(SchemaError::NullIdentifier {
                column: column.to_string(),
                row,
            });
        }
        if index.insert(value.clone(), row).is_some() {
            return Err(SchemaError::DuplicateVertexId {
                column: column.to_string(),
                value: value.clone(),
            });
        }
    }
    Ok(index)
}

/// Distinct endpoint values, source column first, in first-appearance order
pub(crate) fn endpoint_values_in_order(
    edges: &Table,
    source: &str,
    destination: &str,
) -> Result<Vec<Value>, SchemaError> {
    let mut seen = AHashSet::new();
    let mut ordered = Vec::new();
    for name in [source, destination] {
        let column = edges.require_column(name, "edge")?;
        for (row, value) in column.iter().enumerate() {
            if value.is_null() {
                return Err(SchemaError::NullIdentifier {
                    column: name.to_string(),
                    row,
                });
            }
            if seen.insert(value.clone()) {
                ordered.push(value.clone());
            }
        }
    }
    Ok(ordered)
}
