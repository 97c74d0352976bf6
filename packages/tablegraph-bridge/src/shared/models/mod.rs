//! Shared models

mod column;
mod indexed_graph;
mod table;
mod tabular_graph;
mod value;

pub use column::Column;
pub use indexed_graph::{AttributeMap, ElementKind, IndexedGraph};
pub use table::Table;
pub use tabular_graph::{Bindings, TabularGraph};
pub use value::{DType, Value};

pub(crate) use tabular_graph::{endpoint_values_in_order, index_vertex_ids};
