//! Indexed → Tabular conversion

use tracing::debug;

use crate::config::IdentifierPolicy;
use crate::errors::SchemaError;
use crate::features::identity::{IdentifierResolver, VertexIdSource};
use crate::features::schema_merge::SchemaMerger;
use crate::shared::constants::reserved;
use crate::shared::models::{
    index_vertex_ids, Bindings, Column, ElementKind, IndexedGraph, Table, TabularGraph, Value,
};

/// Options for [`from_indexed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromIndexedOptions {
    /// Emit a vertex table (and node binding)
    pub load_nodes: bool,
    pub identifier_policy: IdentifierPolicy,
}

impl Default for FromIndexedOptions {
    fn default() -> Self {
        Self {
            load_nodes: true,
            identifier_policy: IdentifierPolicy::default(),
        }
    }
}

/// Rebuild a tabular graph from an indexed one.
///
/// Without `existing`, reserved default names are used for every identifier
/// column. With `existing`, its binding names are reused and the result is
/// the non-destructive merge of the fresh tables into `existing`.
pub fn from_indexed(
    graph: &IndexedGraph,
    existing: Option<&TabularGraph>,
    options: &FromIndexedOptions,
) -> Result<TabularGraph, SchemaError> {
    let scheme = IdentifierResolver::resolve_output(existing);
    let id_source = IdentifierResolver::locate_vertex_ids(
        graph,
        existing.and_then(TabularGraph::node),
        existing.is_some(),
        options.identifier_policy,
    );

    let ids = match id_source.attribute() {
        Some(name) => match graph.attribute(ElementKind::Vertex, name) {
            Some(column) => column.clone(),
            None => positions(graph.vertex_count())?,
        },
        None => match existing {
            Some(original) => match existing_ids(original, graph.vertex_count())? {
                Some(column) => column,
                None => positions(graph.vertex_count())?,
            },
            None => positions(graph.vertex_count())?,
        },
    };
    index_vertex_ids(&ids, &scheme.node)?;

    // Vertex table: identifier first, then every other vertex attribute
    let mut nodes = Table::new();
    nodes.push_column(scheme.node.as_str(), ids.clone())?;
    for (name, column) in graph.attributes(ElementKind::Vertex).iter() {
        if name == reserved::NODE || Some(name) == id_source.attribute() {
            continue;
        }
        if name == scheme.node {
            return Err(SchemaError::ReservedNameCollision {
                name: name.to_string(),
                table: "vertex",
            });
        }
        nodes.push_column(name, column.clone())?;
    }

    // Edge table: endpoints translated back to identifier values
    let id_values = ids.values();
    let (sources, destinations): (Vec<Value>, Vec<Value>) = graph
        .edges()
        .iter()
        .map(|&(src, dst)| (id_values[src].clone(), id_values[dst].clone()))
        .unzip();
    let mut edges = Table::new();
    edges.push_column(scheme.source.as_str(), Column::new(&scheme.source, sources)?)?;
    edges.push_column(
        scheme.destination.as_str(),
        Column::new(&scheme.destination, destinations)?,
    )?;
    for (name, column) in graph.attributes(ElementKind::Edge).iter() {
        if name == scheme.source || name == scheme.destination {
            return Err(SchemaError::ReservedNameCollision {
                name: name.to_string(),
                table: "edge",
            });
        }
        edges.push_column(name, column.clone())?;
    }

    let edge_binding = existing
        .and_then(TabularGraph::edge)
        .filter(|name| edges.has_column(name))
        .map(str::to_string);
    let fresh = TabularGraph::from_parts(
        edges,
        Some(nodes),
        Bindings {
            source: scheme.source.clone(),
            destination: scheme.destination.clone(),
            node: Some(scheme.node.clone()),
            edge: edge_binding,
        },
    );

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        id_source = ?id_source,
        merged = existing.is_some(),
        "converted indexed graph to tabular"
    );

    let result = match existing {
        Some(original) => {
            let from_attribute = matches!(id_source, VertexIdSource::Attribute(_));
            SchemaMerger::merge(original, &fresh, from_attribute)?.0
        }
        None => fresh,
    };

    Ok(if options.load_nodes {
        result
    } else {
        result.without_nodes()
    })
}

fn positions(count: usize) -> Result<Column, SchemaError> {
    Column::from_values(reserved::NODE, 0..count)
}

/// Identifiers of `original` by position, when it has exactly `count` vertices.
///
/// Position `i` of an unlabelled indexed graph is row `i` of the original
/// vertex table, or the `i`th distinct endpoint when it has none.
fn existing_ids(original: &TabularGraph, count: usize) -> Result<Option<Column>, SchemaError> {
    let materialized;
    let graph = if original.nodes().is_some() {
        original
    } else {
        materialized = original.materialize_nodes()?;
        &materialized
    };
    let ids = match (graph.nodes(), graph.node()) {
        (Some(nodes), Some(node)) => nodes.column(node),
        _ => None,
    };
    Ok(ids.filter(|column| column.len() == count).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::conversion::to_indexed;
    use pretty_assertions::assert_eq;

    fn path() -> IndexedGraph {
        IndexedGraph::new(3, vec![(0, 1), (1, 2)], true).unwrap()
    }

    #[test]
    fn test_positions_synthesized_without_identifier() {
        let g = from_indexed(&path(), None, &FromIndexedOptions::default()).unwrap();
        assert_eq!(g.node(), Some(reserved::NODE));
        assert_eq!(g.source(), reserved::SOURCE);
        assert_eq!(g.destination(), reserved::DESTINATION);
        assert_eq!(
            g.nodes().unwrap().column(reserved::NODE).unwrap().values(),
            &[Value::Int(0), Value::Int(1), Value::Int(2)]
        );
        assert_eq!(
            g.edges().column(reserved::DESTINATION).unwrap().values(),
            &[Value::Int(1), Value::Int(2)]
        );
    }

    #[test]
    fn test_name_attribute_used_as_identifier() {
        let ig = path()
            .with_attribute(ElementKind::Vertex, reserved::NAME_ATTR, vec!["x", "y", "z"])
            .unwrap();
        let g = from_indexed(&ig, None, &FromIndexedOptions::default()).unwrap();
        let nodes = g.nodes().unwrap();
        assert_eq!(nodes.column_names(), vec![reserved::NODE]);
        assert_eq!(
            g.edges().column(reserved::SOURCE).unwrap().values(),
            &[Value::from("x"), Value::from("y")]
        );

        let strict = FromIndexedOptions {
            identifier_policy: IdentifierPolicy::AlwaysSynthesize,
            ..FromIndexedOptions::default()
        };
        let g = from_indexed(&ig, None, &strict).unwrap();
        assert_eq!(
            g.nodes().unwrap().column_names(),
            vec![reserved::NODE, reserved::NAME_ATTR]
        );
    }

    #[test]
    fn test_edge_attribute_colliding_with_default_endpoint() {
        let ig = path()
            .with_attribute(ElementKind::Edge, reserved::SOURCE, vec![1, 2])
            .unwrap();
        let err = from_indexed(&ig, None, &FromIndexedOptions::default()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ReservedNameCollision {
                name: reserved::SOURCE.to_string(),
                table: "edge",
            }
        );
    }

    #[test]
    fn test_existing_bindings_reused() {
        let edges = Table::from_columns(vec![("s", vec!["a", "b"]), ("d", vec!["b", "c"])]).unwrap();
        let original = TabularGraph::from_edges(edges, "s", "d").unwrap();
        let ig = to_indexed(&original, true, true).unwrap();

        let g = from_indexed(&ig, Some(&original), &FromIndexedOptions::default()).unwrap();
        assert_eq!(g.source(), "s");
        assert_eq!(g.destination(), "d");
        assert_eq!(g.edges(), original.edges());
        assert_eq!(
            g.nodes().unwrap().column(reserved::NODE).unwrap().values(),
            &[Value::from("a"), Value::from("b"), Value::from("c")]
        );
    }

    #[test]
    fn test_load_nodes_false_drops_vertex_table() {
        let options = FromIndexedOptions {
            load_nodes: false,
            ..FromIndexedOptions::default()
        };
        let g = from_indexed(&path(), None, &options).unwrap();
        assert!(g.nodes().is_none());
        assert_eq!(g.node(), None);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_duplicate_identifier_attribute_rejected() {
        let ig = path()
            .with_attribute(ElementKind::Vertex, reserved::NODE, vec![1, 1, 2])
            .unwrap();
        assert!(matches!(
            from_indexed(&ig, None, &FromIndexedOptions::default()),
            Err(SchemaError::DuplicateVertexId { .. })
        ));
    }
}
