//! Indexed graph: dense integer positions with parallel attribute arrays
//!
//! This is the representation handed to the algorithms capability. Vertices
//! and edges are addressed by 0-based position; attributes are name → column
//! maps whose columns are length-checked against the element count.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::column::Column;
use super::value::Value;
use crate::errors::SchemaError;

/// Which element an attribute belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Vertex,
    Edge,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Edge => "edge",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered attribute name → column map
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttributeMap {
    entries: Vec<(String, Column)>,
}

impl AttributeMap {
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: String, column: Column) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = column,
            None => self.entries.push((name, column)),
        }
    }

    fn remove(&mut self, name: &str) -> Option<Column> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }
}

/// Graph addressed by dense positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedGraph {
    vertex_count: usize,
    edges: Vec<(usize, usize)>,
    directed: bool,
    vertex_attrs: AttributeMap,
    edge_attrs: AttributeMap,
}

impl IndexedGraph {
    /// Build a graph over `vertex_count` vertices
    ///
    /// Every endpoint must be `< vertex_count`.
    pub fn new(
        vertex_count: usize,
        edges: Vec<(usize, usize)>,
        directed: bool,
    ) -> Result<Self, SchemaError> {
        for (edge, &(src, dst)) in edges.iter().enumerate() {
            for endpoint in [src, dst] {
                if endpoint >= vertex_count {
                    return Err(SchemaError::EndpointOutOfRange {
                        edge,
                        endpoint,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self {
            vertex_count,
            edges,
            directed,
            vertex_attrs: AttributeMap::default(),
            edge_attrs: AttributeMap::default(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Same graph with a different traversal flag; identity is unchanged
    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn element_count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Vertex => self.vertex_count,
            ElementKind::Edge => self.edges.len(),
        }
    }

    pub fn attributes(&self, kind: ElementKind) -> &AttributeMap {
        match kind {
            ElementKind::Vertex => &self.vertex_attrs,
            ElementKind::Edge => &self.edge_attrs,
        }
    }

    pub fn attribute(&self, kind: ElementKind, name: &str) -> Option<&Column> {
        self.attributes(kind).get(name)
    }

    pub fn attribute_names(&self, kind: ElementKind) -> Vec<&str> {
        self.attributes(kind).names().collect()
    }

    /// Attach (or replace) an attribute column
    pub fn set_attribute(
        &mut self,
        kind: ElementKind,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        let expected = self.element_count(kind);
        if column.len() != expected {
            return Err(SchemaError::ColumnLength {
                column: name,
                expected,
                found: column.len(),
            });
        }
        match kind {
            ElementKind::Vertex => self.vertex_attrs.insert(name, column),
            ElementKind::Edge => self.edge_attrs.insert(name, column),
        }
        Ok(())
    }

    /// Builder-style attribute attach from raw values
    pub fn with_attribute<V: Into<Value>>(
        mut self,
        kind: ElementKind,
        name: &str,
        values: Vec<V>,
    ) -> Result<Self, SchemaError> {
        let column = Column::from_values(name, values)?;
        self.set_attribute(kind, name, column)?;
        Ok(self)
    }

    pub fn remove_attribute(&mut self, kind: ElementKind, name: &str) -> Option<Column> {
        match kind {
            ElementKind::Vertex => self.vertex_attrs.remove(name),
            ElementKind::Edge => self.edge_attrs.remove(name),
        }
    }

    /// Vertex-induced subgraph, keeping the given vertices in order.
    ///
    /// Edges with both endpoints kept survive in their original order; all
    /// vertex and edge attributes are carried over.
    pub fn induced_subgraph(&self, keep: &[usize]) -> Result<Self, SchemaError> {
        let mut remap = vec![None; self.vertex_count];
        for (new_pos, &old_pos) in keep.iter().enumerate() {
            if old_pos >= self.vertex_count {
                return Err(SchemaError::EndpointOutOfRange {
                    edge: new_pos,
                    endpoint: old_pos,
                    vertex_count: self.vertex_count,
                });
            }
            if remap[old_pos].replace(new_pos).is_some() {
                return Err(SchemaError::DuplicateVertexPosition { vertex: old_pos });
            }
        }
        let mut kept_edges = Vec::new();
        let mut edges = Vec::new();
        for (idx, &(src, dst)) in self.edges.iter().enumerate() {
            if let (Some(s), Some(d)) = (remap[src], remap[dst]) {
                kept_edges.push(idx);
                edges.push((s, d));
            }
        }
        let mut sub = Self::new(keep.len(), edges, self.directed)?;
        for (name, column) in self.vertex_attrs.iter() {
            sub.set_attribute(ElementKind::Vertex, name, column.take(keep)?)?;
        }
        for (name, column) in self.edge_attrs.iter() {
            sub.set_attribute(ElementKind::Edge, name, column.take(&kept_edges)?)?;
        }
        Ok(sub)
    }

    /// Same vertices, keeping only the listed edges (in the given order)
    pub fn edge_subgraph(&self, keep: &[usize]) -> Result<Self, SchemaError> {
        let edges = keep
            .iter()
            .map(|&e| {
                self.edges.get(e).copied().ok_or(SchemaError::EndpointOutOfRange {
                    edge: e,
                    endpoint: e,
                    vertex_count: self.vertex_count,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut sub = Self::new(self.vertex_count, edges, self.directed)?;
        sub.vertex_attrs = self.vertex_attrs.clone();
        for (name, column) in self.edge_attrs.iter() {
            sub.set_attribute(ElementKind::Edge, name, column.take(keep)?)?;
        }
        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> IndexedGraph {
        IndexedGraph::new(3, vec![(0, 1), (1, 2), (2, 0)], true).unwrap()
    }

    #[test]
    fn test_endpoint_out_of_range() {
        let err = IndexedGraph::new(2, vec![(0, 2)], true).unwrap_err();
        assert_eq!(
            err,
            SchemaError::EndpointOutOfRange {
                edge: 0,
                endpoint: 2,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn test_attribute_length_checked() {
        let mut g = triangle();
        let err = g
            .set_attribute(ElementKind::Vertex, "w", Column::nulls(2))
            .unwrap_err();
        assert!(matches!(err, SchemaError::ColumnLength { expected: 3, found: 2, .. }));
        g.set_attribute(ElementKind::Edge, "w", Column::nulls(3)).unwrap();
        assert_eq!(g.attribute_names(ElementKind::Edge), vec!["w"]);
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let g = triangle()
            .with_attribute(ElementKind::Vertex, "a", vec![1, 2, 3])
            .unwrap()
            .with_attribute(ElementKind::Vertex, "b", vec![1, 2, 3])
            .unwrap()
            .with_attribute(ElementKind::Vertex, "a", vec![7, 8, 9])
            .unwrap();
        assert_eq!(g.attribute_names(ElementKind::Vertex), vec!["a", "b"]);
        assert_eq!(
            g.attribute(ElementKind::Vertex, "a").unwrap().get(0),
            Some(&Value::Int(7))
        );
    }

    #[test]
    fn test_induced_subgraph_carries_attributes() {
        let g = triangle()
            .with_attribute(ElementKind::Vertex, "id", vec!["a", "b", "c"])
            .unwrap()
            .with_attribute(ElementKind::Edge, "w", vec![10, 20, 30])
            .unwrap();
        let sub = g.induced_subgraph(&[1, 2]).unwrap();
        assert_eq!(sub.vertex_count(), 2);
        assert_eq!(sub.edges(), &[(0, 1)]);
        assert_eq!(
            sub.attribute(ElementKind::Vertex, "id").unwrap().values(),
            &[Value::from("b"), Value::from("c")]
        );
        assert_eq!(
            sub.attribute(ElementKind::Edge, "w").unwrap().values(),
            &[Value::Int(20)]
        );
    }

    #[test]
    fn test_induced_subgraph_rejects_repeated_vertex() {
        assert_eq!(
            triangle().induced_subgraph(&[0, 1, 0]).unwrap_err(),
            SchemaError::DuplicateVertexPosition { vertex: 0 }
        );
    }

    #[test]
    fn test_edge_subgraph_keeps_vertices() {
        let g = triangle()
            .with_attribute(ElementKind::Edge, "w", vec![10, 20, 30])
            .unwrap();
        let sub = g.edge_subgraph(&[2]).unwrap();
        assert_eq!(sub.vertex_count(), 3);
        assert_eq!(sub.edges(), &[(2, 0)]);
        assert!(g.edge_subgraph(&[5]).is_err());
    }
}
