//! Schema Merger
//!
//! Reconciles a freshly rebuilt tabular graph with the original one it was
//! derived from. Merging is positional: row `i` of the fresh table is row `i`
//! of the original, so no join on identifier values is needed. Existing
//! columns always win; only genuinely new attribute names are added.
//!
//! When the fresh table no longer lines up with the original (different row
//! count, or identifiers / endpoint pairs that disagree by position) the
//! derived graph is a structural transform and the fresh table is used as is.

use tracing::{debug, warn};

use crate::errors::SchemaError;
use crate::shared::models::{index_vertex_ids, Bindings, Column, Table, TabularGraph};

/// How one table kind was reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Rows aligned; new columns appended to the original table
    Positional,
    /// Rows did not align; the fresh table replaced the original
    Replaced,
}

/// Outcome of a merge, for callers that need to know what happened
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub vertices: MergeMode,
    pub edges: MergeMode,
    /// Derived columns discarded because an existing column had the same name
    pub discarded: Vec<String>,
}

pub struct SchemaMerger;

impl SchemaMerger {
    /// Merge `fresh` into `original`.
    ///
    /// `fresh` must use the original's binding names for its identifier
    /// columns. `vertex_ids_from_attribute` says whether the fresh vertex
    /// identifiers were recovered from an attribute (and can be compared
    /// against the original's) or synthesized from positions.
    pub fn merge(
        original: &TabularGraph,
        fresh: &TabularGraph,
        vertex_ids_from_attribute: bool,
    ) -> Result<(TabularGraph, MergeReport), SchemaError> {
        let mut discarded = Vec::new();

        let (nodes, node, vertices) = match (original.nodes(), fresh.nodes()) {
            (Some(orig), Some(new)) => {
                let node = original.node().unwrap_or_default();
                let aligned = orig.num_rows() == new.num_rows()
                    && (!vertex_ids_from_attribute || same_values(orig, new, &[node]));
                if aligned {
                    let merged = append_new_columns(orig, new, &[node], &mut discarded)?;
                    (Some(merged), Some(node.to_string()), MergeMode::Positional)
                } else {
                    (Some(new.clone()), fresh.node().map(str::to_string), MergeMode::Replaced)
                }
            }
            (Some(orig), None) => (
                Some(orig.clone()),
                original.node().map(str::to_string),
                MergeMode::Positional,
            ),
            (None, new) => (
                new.cloned(),
                fresh.node().map(str::to_string),
                MergeMode::Replaced,
            ),
        };

        let endpoints = [original.source(), original.destination()];
        let orig_edges = original.edges();
        let new_edges = fresh.edges();
        let (edges, edge_mode) = if orig_edges.num_rows() == new_edges.num_rows()
            && same_values(orig_edges, new_edges, &endpoints)
        {
            let merged = append_new_columns(orig_edges, new_edges, &endpoints, &mut discarded)?;
            (merged, MergeMode::Positional)
        } else {
            (new_edges.clone(), MergeMode::Replaced)
        };

        let edge = original
            .edge()
            .filter(|name| edges.has_column(name))
            .map(str::to_string);

        for name in &discarded {
            warn!(
                column = %name,
                "derived attribute discarded: an existing column has the same name"
            );
        }
        debug!(
            vertices = ?vertices,
            edges = ?edge_mode,
            "merged derived graph into original"
        );

        let bindings = Bindings {
            source: original.source().to_string(),
            destination: original.destination().to_string(),
            node,
            edge,
        };
        let report = MergeReport {
            vertices,
            edges: edge_mode,
            discarded,
        };
        if let (Some(table), Some(node)) = (nodes.as_ref(), bindings.node.as_deref()) {
            check_endpoints(&edges, table, node, &endpoints)?;
        }
        Ok((TabularGraph::from_parts(edges, nodes, bindings), report))
    }
}

/// Every endpoint of the merged edge table must name a merged vertex
fn check_endpoints(
    edges: &Table,
    nodes: &Table,
    node: &str,
    endpoints: &[&str],
) -> Result<(), SchemaError> {
    let ids = index_vertex_ids(nodes.require_column(node, "vertex")?, node)?;
    for &name in endpoints {
        let column = edges.require_column(name, "edge")?;
        if let Some((row, value)) = column.iter().enumerate().find(|(_, v)| !ids.contains_key(*v)) {
            return Err(SchemaError::DanglingEdge {
                row,
                column: name.to_string(),
                value: value.clone(),
            });
        }
    }
    Ok(())
}

/// Do both tables hold identical values in every named column?
fn same_values(a: &Table, b: &Table, names: &[&str]) -> bool {
    names.iter().all(|name| match (a.column(name), b.column(name)) {
        (Some(x), Some(y)) => x.values() == y.values(),
        _ => false,
    })
}

/// Original table plus the fresh columns it does not have yet.
///
/// Key columns are never copied. A fresh column whose name already exists is
/// dropped; it is reported as discarded only when its values differ.
fn append_new_columns(
    original: &Table,
    fresh: &Table,
    keys: &[&str],
    discarded: &mut Vec<String>,
) -> Result<Table, SchemaError> {
    let mut merged = original.clone();
    for (name, column) in fresh.columns() {
        if keys.contains(&name) {
            continue;
        }
        match original.column(name) {
            Some(existing) => {
                if !same_column(existing, column) {
                    discarded.push(name.to_string());
                }
            }
            None => merged.push_column(name, column.clone())?,
        }
    }
    Ok(merged)
}

fn same_column(a: &Column, b: &Column) -> bool {
    a.values() == b.values()
}
