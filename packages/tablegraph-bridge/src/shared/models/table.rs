//! Ordered, named column tables
//!
//! The tabular engine surface consumed by the converters: column selection,
//! row-order-preserving construction from column arrays, and positional
//! (join-free) column merging.

use super::column::Column;
use super::value::Value;
use crate::errors::SchemaError;

/// Table of equal-length named columns, in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<(String, Column)>,
    num_rows: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, values)` pairs, preserving row order
    ///
    /// # Example
    /// ```
    /// use tablegraph_bridge::Table;
    ///
    /// let edges = Table::from_columns(vec![
    ///     ("s", vec![0, 1, 2]),
    ///     ("d", vec![1, 2, 0]),
    /// ])
    /// .unwrap();
    /// assert_eq!(edges.num_rows(), 3);
    /// ```
    pub fn from_columns<I, K, V>(columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut table = Self::new();
        for (name, values) in columns {
            let name = name.into();
            let column = Column::from_values(&name, values)?;
            table.push_column(name, column)?;
        }
        Ok(table)
    }

    /// Builder-style column append
    pub fn with_column<V: Into<Value>>(
        mut self,
        name: impl Into<String>,
        values: Vec<V>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let column = Column::from_values(&name, values)?;
        self.push_column(name, column)?;
        Ok(self)
    }

    /// Append a column; the first column fixes the row count
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) -> Result<(), SchemaError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(SchemaError::DuplicateColumn {
                column: name,
                table: "input",
            });
        }
        if self.columns.is_empty() {
            self.num_rows = column.len();
        } else if column.len() != self.num_rows {
            return Err(SchemaError::ColumnLength {
                column: name,
                expected: self.num_rows,
                found: column.len(),
            });
        }
        self.columns.push((name, column));
        Ok(())
    }

    /// Replace a column in place, or append it when absent
    pub fn replace_column(&mut self, name: &str, column: Column) -> Result<(), SchemaError> {
        match self.columns.iter().position(|(n, _)| n == name) {
            Some(idx) => {
                if column.len() != self.num_rows {
                    return Err(SchemaError::ColumnLength {
                        column: name.to_string(),
                        expected: self.num_rows,
                        found: column.len(),
                    });
                }
                self.columns[idx].1 = column;
                Ok(())
            }
            None => self.push_column(name, column),
        }
    }

    /// Remove a column, returning it
    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.columns.iter().position(|(n, _)| n == name)?;
        let (_, column) = self.columns.remove(idx);
        if self.columns.is_empty() {
            self.num_rows = 0;
        }
        Some(column)
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), SchemaError> {
        if from == to {
            return Ok(());
        }
        if self.has_column(to) {
            return Err(SchemaError::DuplicateColumn {
                column: to.to_string(),
                table: "input",
            });
        }
        match self.columns.iter_mut().find(|(n, _)| n == from) {
            Some(entry) => {
                entry.0 = to.to_string();
                Ok(())
            }
            None => Err(SchemaError::MissingColumn {
                column: from.to_string(),
                table: "input",
            }),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Column lookup that reports which table was missing it
    pub fn require_column(&self, name: &str, table: &'static str) -> Result<&Column, SchemaError> {
        self.column(name).ok_or_else(|| SchemaError::MissingColumn {
            column: name.to_string(),
            table,
        })
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Project onto the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> Result<Table, SchemaError> {
        let mut out = Table::new();
        for name in names {
            let column = self.require_column(name, "input")?;
            out.push_column(*name, column.clone())?;
        }
        Ok(out)
    }

    /// Row `index` as `(column, value)` pairs
    pub fn row(&self, index: usize) -> Option<Vec<(&str, &Value)>> {
        if index >= self.num_rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .filter_map(|(n, c)| c.get(index).map(|v| (n.as_str(), v)))
                .collect(),
        )
    }

    /// Gather rows by index
    pub fn take(&self, indices: &[usize]) -> Result<Table, SchemaError> {
        if let Some(&row) = indices.iter().find(|&&row| row >= self.num_rows) {
            return Err(SchemaError::RowOutOfRange {
                row,
                len: self.num_rows,
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|(n, c)| Ok((n.clone(), c.take(indices)?)))
            .collect::<Result<_, SchemaError>>()?;
        Ok(Table {
            columns,
            num_rows: if self.columns.is_empty() { 0 } else { indices.len() },
        })
    }

    /// Stable sort of all rows by one column
    pub fn sort_by(&self, name: &str) -> Result<Table, SchemaError> {
        let key = self.require_column(name, "input")?;
        let mut order: Vec<usize> = (0..self.num_rows).collect();
        order.sort_by(|&a, &b| key.values()[a].cmp(&key.values()[b]));
        self.take(&order)
    }
}
