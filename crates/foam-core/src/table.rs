//! Core table types for monitoring data

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// A loaded table: an index column plus value columns aligned by row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Row index/key (commonly the time value)
    pub index: Column,
    /// Value columns in file order
    pub columns: Vec<Column>,
    /// Files the rows came from, in load order
    pub sources: Vec<PathBuf>,
}

impl Table {
    /// Build a table, checking column lengths and name uniqueness
    pub fn new(index: Column, columns: Vec<Column>, sources: Vec<PathBuf>) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(index.name.as_str());

        for column in &columns {
            if column.values.len() != index.values.len() {
                return Err(Error::ColumnLengthMismatch {
                    column: column.name.clone(),
                    expected: index.values.len(),
                    found: column.values.len(),
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(Error::DuplicateColumn(column.name.clone()));
            }
        }

        Ok(Self {
            index,
            columns,
            sources,
        })
    }

    /// Get the number of value columns (index excluded)
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.index.values.len()
    }

    /// Value column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Find a value column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Values of one row, index first
    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        let key = *self.index.values.get(row)?;
        let mut values = Vec::with_capacity(self.columns.len() + 1);
        values.push(key);
        values.extend(self.columns.iter().map(|c| c.values[row]));
        Some(values)
    }
}

/// A named column of floating-point values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (e.g., "Time" or "U.0")
    pub name: String,
    /// One value per row; missing cells are NaN
    pub values: Vec<f64>,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A single token from a data file
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// Empty cell
    Missing,
    /// Plain numeric literal
    Scalar(f64),
    /// Parenthesized vector/tensor sample, e.g. `(1.2 3.4 5.6)`
    Tuple(Vec<f64>),
}

impl RawCell {
    /// Parse a token, returning None if it is not numeric
    ///
    /// Parentheses are stripped wherever they occur, so nested tensor
    /// notation flattens into one tuple in source order.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Some(RawCell::Missing);
        }

        if trimmed.contains(['(', ')']) || trimmed.contains(char::is_whitespace) {
            let inner = trimmed.replace(['(', ')'], " ");
            let components = inner
                .split_whitespace()
                .map(|t| t.parse::<f64>().ok())
                .collect::<Option<Vec<f64>>>()?;
            if components.is_empty() {
                return None;
            }
            return Some(RawCell::Tuple(components));
        }

        trimmed.parse::<f64>().ok().map(RawCell::Scalar)
    }

    /// Number of components this cell carries (0 for a missing cell)
    pub fn width(&self) -> usize {
        match self {
            RawCell::Missing => 0,
            RawCell::Scalar(_) => 1,
            RawCell::Tuple(values) => values.len(),
        }
    }
}

/// A column before tuple expansion
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    /// Column name, decoration already stripped
    pub name: String,
    /// Parsed cells, one per row
    pub cells: Vec<RawCell>,
}

impl RawColumn {
    /// Create a new raw column
    pub fn new(name: impl Into<String>, cells: Vec<RawCell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// A parsed file before tuple expansion
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Index column (always scalar)
    pub index: Column,
    /// Columns as read from the file
    pub columns: Vec<RawColumn>,
    /// Source file path(s)
    pub sources: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_cell_parse_scalar() {
        assert_eq!(RawCell::parse("42"), Some(RawCell::Scalar(42.0)));
        assert_eq!(RawCell::parse(" -1.5e-3 "), Some(RawCell::Scalar(-1.5e-3)));
    }

    #[test]
    fn test_raw_cell_parse_tuple() {
        assert_eq!(
            RawCell::parse("(1.2 3.4 5.6)"),
            Some(RawCell::Tuple(vec![1.2, 3.4, 5.6]))
        );
        assert_eq!(
            RawCell::parse("((1 2) (3 4))"),
            Some(RawCell::Tuple(vec![1.0, 2.0, 3.0, 4.0]))
        );
    }

    #[test]
    fn test_raw_cell_parse_missing() {
        assert_eq!(RawCell::parse(""), Some(RawCell::Missing));
        assert_eq!(RawCell::parse("   "), Some(RawCell::Missing));
    }

    #[test]
    fn test_raw_cell_parse_invalid() {
        assert_eq!(RawCell::parse("hello"), None);
        assert_eq!(RawCell::parse("()"), None);
        assert_eq!(RawCell::parse("(1 x 3)"), None);
    }

    #[test]
    fn test_raw_cell_width() {
        assert_eq!(RawCell::Missing.width(), 0);
        assert_eq!(RawCell::Scalar(1.0).width(), 1);
        assert_eq!(RawCell::Tuple(vec![1.0, 2.0, 3.0]).width(), 3);
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let index = Column::new("Time", vec![0.0, 1.0]);
        let columns = vec![Column::new("p", vec![1.0])];
        let err = Table::new(index, columns, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn test_table_rejects_duplicate_names() {
        let index = Column::new("Time", vec![0.0]);
        let columns = vec![Column::new("p", vec![1.0]), Column::new("p", vec![2.0])];
        let err = Table::new(index, columns, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(name) if name == "p"));
    }

    #[test]
    fn test_table_row() {
        let index = Column::new("Time", vec![0.0, 1.0]);
        let columns = vec![Column::new("p", vec![10.0, 11.0])];
        let table = Table::new(index, columns, Vec::new()).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.row(1), Some(vec![1.0, 11.0]));
        assert_eq!(table.row(2), None);
        assert!(table.find_column("p").is_some());
    }
}
