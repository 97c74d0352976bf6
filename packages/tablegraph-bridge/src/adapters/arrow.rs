//! Apache Arrow interop
//!
//! Moves [`Table`]s in and out of Arrow `RecordBatch`es so that graphs can be
//! handed over from columnar engines without going through rows.
//!
//! Arrow → Table type mapping:
//! - Int8..Int64, UInt8..UInt64 → `Int` (UInt64 above `i64::MAX` is rejected)
//! - Float32, Float64 → `Float`
//! - Utf8, LargeUtf8 → `Str`
//! - Boolean → `Bool`
//! - Null → all-null column
//!
//! Table → Arrow writes Int64 / Float64 / Utf8 / Boolean, and `Null` for
//! columns without a single non-null value.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, LargeStringArray, NullArray,
    StringArray, UInt64Array,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use tracing::debug;

use crate::errors::{Result, SchemaError};
use crate::shared::models::{Column, DType, Table, TabularGraph, Value};

/// Convert a record batch into a table, keeping column order
pub fn record_batch_to_table(batch: &RecordBatch) -> Result<Table> {
    let schema = batch.schema();
    let mut table = Table::new();
    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        let values = array_values(field.name(), array.as_ref())?;
        table.push_column(field.name().as_str(), Column::new(field.name(), values)?)?;
    }
    debug!(
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "record batch converted to table"
    );
    Ok(table)
}

/// Convert a table into a record batch (every field nullable)
pub fn table_to_record_batch(table: &Table) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(table.num_columns());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.num_columns());
    for (name, column) in table.columns() {
        let array = column_array(column);
        fields.push(Field::new(name, array.data_type().clone(), true));
        arrays.push(array);
    }
    let options = RecordBatchOptions::new().with_row_count(Some(table.num_rows()));
    let batch = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)?;
    Ok(batch)
}

/// Build a tabular graph straight from record batches
///
/// `nodes` pairs the vertex batch with its identifier column.
pub fn graph_from_record_batches(
    edges: &RecordBatch,
    source: &str,
    destination: &str,
    nodes: Option<(&RecordBatch, &str)>,
) -> Result<TabularGraph> {
    let graph = TabularGraph::from_edges(record_batch_to_table(edges)?, source, destination)?;
    let graph = match nodes {
        Some((batch, node)) => graph.with_nodes(record_batch_to_table(batch)?, node)?,
        None => graph,
    };
    Ok(graph)
}

fn unsupported(column: &str, data_type: &DataType) -> SchemaError {
    SchemaError::UnsupportedColumnType {
        column: column.to_string(),
        data_type: data_type.to_string(),
    }
}

fn downcast<'a, T: 'static>(column: &str, array: &'a dyn Array) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| unsupported(column, array.data_type()).into())
}

fn gather<T>(array: &dyn Array, len: usize, value: impl Fn(usize) -> T) -> Vec<Value>
where
    T: Into<Value>,
{
    (0..len)
        .map(|i| {
            if array.is_null(i) {
                Value::Null
            } else {
                value(i).into()
            }
        })
        .collect()
}

fn array_values(column: &str, array: &dyn Array) -> Result<Vec<Value>> {
    let len = array.len();
    let values = match array.data_type() {
        DataType::Null => vec![Value::Null; len],
        DataType::Boolean => {
            let bools = downcast::<BooleanArray>(column, array)?;
            gather(array, len, |i| bools.value(i))
        }
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => {
            let widened = cast(array, &DataType::Int64)?;
            let ints = downcast::<Int64Array>(column, widened.as_ref())?;
            gather(array, len, |i| ints.value(i))
        }
        DataType::UInt64 => {
            let ints = downcast::<UInt64Array>(column, array)?;
            let mut values = Vec::with_capacity(len);
            for i in 0..len {
                if array.is_null(i) {
                    values.push(Value::Null);
                    continue;
                }
                let raw = ints.value(i);
                let int = i64::try_from(raw).map_err(|_| SchemaError::IntegerOverflow {
                    column: column.to_string(),
                    value: raw.to_string(),
                })?;
                values.push(Value::Int(int));
            }
            values
        }
        DataType::Float32 | DataType::Float64 => {
            let widened = cast(array, &DataType::Float64)?;
            let floats = downcast::<Float64Array>(column, widened.as_ref())?;
            gather(array, len, |i| floats.value(i))
        }
        DataType::Utf8 => {
            let strings = downcast::<StringArray>(column, array)?;
            gather(array, len, |i| strings.value(i))
        }
        DataType::LargeUtf8 => {
            let strings = downcast::<LargeStringArray>(column, array)?;
            gather(array, len, |i| strings.value(i))
        }
        other => return Err(unsupported(column, other).into()),
    };
    Ok(values)
}

fn column_array(column: &Column) -> ArrayRef {
    match column.dtype() {
        None => Arc::new(NullArray::new(column.len())),
        Some(DType::Bool) => Arc::new(BooleanArray::from(
            column.iter().map(Value::as_bool).collect::<Vec<_>>(),
        )),
        Some(DType::Int) => Arc::new(Int64Array::from(
            column.iter().map(Value::as_i64).collect::<Vec<_>>(),
        )),
        Some(DType::Float) => Arc::new(Float64Array::from(
            column.iter().map(Value::as_f64).collect::<Vec<_>>(),
        )),
        Some(DType::Str) => Arc::new(StringArray::from(
            column.iter().map(Value::as_str).collect::<Vec<_>>(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float32Array, Int32Array, UInt8Array};
    use arrow::datatypes::TimeUnit;
    use crate::errors::BridgeError;

    fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
        RecordBatch::try_from_iter(columns).unwrap()
    }

    #[test]
    fn test_integer_and_float_widening() {
        let b = batch(vec![
            ("a", Arc::new(Int32Array::from(vec![Some(1), None])) as ArrayRef),
            ("b", Arc::new(UInt8Array::from(vec![7u8, 8])) as ArrayRef),
            ("c", Arc::new(Float32Array::from(vec![0.5f32, 1.5])) as ArrayRef),
        ]);
        let table = record_batch_to_table(&b).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b", "c"]);
        assert_eq!(table.column("a").unwrap().values(), &[Value::Int(1), Value::Null]);
        assert_eq!(table.column("b").unwrap().values(), &[Value::Int(7), Value::Int(8)]);
        assert_eq!(
            table.column("c").unwrap().values(),
            &[Value::Float(0.5), Value::Float(1.5)]
        );
    }

    #[test]
    fn test_uint64_overflow_rejected() {
        let b = batch(vec![(
            "big",
            Arc::new(UInt64Array::from(vec![u64::MAX])) as ArrayRef,
        )]);
        let err = record_batch_to_table(&b).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Schema(SchemaError::IntegerOverflow { .. })
        ));
    }

    #[test]
    fn test_unsupported_type_rejected() {
        let ts = arrow::array::TimestampSecondArray::from(vec![0i64]);
        assert_eq!(ts.data_type(), &DataType::Timestamp(TimeUnit::Second, None));
        let b = batch(vec![("when", Arc::new(ts) as ArrayRef)]);
        let err = record_batch_to_table(&b).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Schema(SchemaError::UnsupportedColumnType { ref column, .. }) if column == "when"
        ));
    }

    #[test]
    fn test_table_to_batch_and_back() {
        let table = Table::from_columns(vec![
            ("id", vec![Value::from("a"), Value::from("b")]),
            ("w", vec![Value::Float(1.0), Value::Null]),
            ("flag", vec![Value::Bool(true), Value::Bool(false)]),
            ("empty", vec![Value::Null, Value::Null]),
        ])
        .unwrap();
        let b = table_to_record_batch(&table).unwrap();
        assert_eq!(b.num_rows(), 2);
        assert_eq!(b.column(0).data_type(), &DataType::Utf8);
        assert_eq!(b.column(3).data_type(), &DataType::Null);
        assert_eq!(record_batch_to_table(&b).unwrap(), table);
    }

    #[test]
    fn test_empty_table_keeps_row_count() {
        let b = table_to_record_batch(&Table::new()).unwrap();
        assert_eq!(b.num_rows(), 0);
        assert_eq!(b.num_columns(), 0);
    }

    #[test]
    fn test_graph_from_batches() {
        let edges = batch(vec![
            ("s", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
            ("d", Arc::new(Int64Array::from(vec![2, 3])) as ArrayRef),
        ]);
        let nodes = batch(vec![(
            "id",
            Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
        )]);
        let graph = graph_from_record_batches(&edges, "s", "d", Some((&nodes, "id"))).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node_count(), Some(3));
        assert_eq!(graph.node(), Some("id"));
    }
}
