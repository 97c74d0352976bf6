//! Homogeneous value columns

use serde::{Deserialize, Serialize};

use super::value::{DType, Value};
use crate::errors::SchemaError;

/// A column of values sharing one scalar type (nulls allowed anywhere)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Column {
    values: Vec<Value>,
    dtype: Option<DType>,
}

impl Column {
    /// Build a column, checking that all non-null values share one type.
    ///
    /// `name` is only used for the error message.
    pub fn new(name: &str, values: Vec<Value>) -> Result<Self, SchemaError> {
        let mut dtype: Option<DType> = None;
        for value in &values {
            if let Some(found) = value.dtype() {
                match dtype {
                    None => dtype = Some(found),
                    Some(expected) if expected != found => {
                        return Err(SchemaError::MixedColumnTypes {
                            column: name.to_string(),
                            expected,
                            found,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(Self { values, dtype })
    }

    /// Build a column from anything convertible into values
    pub fn from_values<V, I>(name: &str, values: I) -> Result<Self, SchemaError>
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    /// All-null column of the given length
    pub fn nulls(len: usize) -> Self {
        Self {
            values: vec![Value::Null; len],
            dtype: None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Scalar type of the non-null values, `None` when all values are null
    pub fn dtype(&self) -> Option<DType> {
        self.dtype
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Gather rows by index
    pub fn take(&self, indices: &[usize]) -> Result<Self, SchemaError> {
        let values = indices
            .iter()
            .map(|&row| {
                self.values.get(row).cloned().ok_or(SchemaError::RowOutOfRange {
                    row,
                    len: self.values.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            values,
            dtype: self.dtype,
        })
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
