//! Expansion of vector/tensor columns into scalar component columns
//!
//! Each column is classified once from all of its cells, then materialized:
//! scalar columns pass through, a tuple column of width W becomes W columns
//! named `{name}.0` .. `{name}.{W-1}` at the original position.

use crate::error::{Error, Result};
use crate::table::{Column, RawCell, RawColumn, RawTable, Table};
use tracing::debug;

/// Shape of a column, decided from the whole column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// One number per cell
    Scalar,
    /// Parenthesized tuples of the given width
    Tuple(usize),
}

/// Classify a column by inspecting every cell
///
/// Missing cells do not vote. A bare number counts as width 1, so it only
/// agrees with one-component tuples.
pub fn classify(column: &RawColumn) -> Result<ColumnKind> {
    let mut kind: Option<ColumnKind> = None;

    for (row, cell) in column.cells.iter().enumerate() {
        let current = match cell {
            RawCell::Missing => continue,
            RawCell::Scalar(_) => ColumnKind::Scalar,
            RawCell::Tuple(values) => ColumnKind::Tuple(values.len()),
        };

        kind = match (kind, current) {
            (None, current) => Some(current),
            (Some(seen), current) if seen == current => Some(seen),
            // A bare number agrees with one-component tuples
            (Some(ColumnKind::Tuple(1)), ColumnKind::Scalar)
            | (Some(ColumnKind::Scalar), ColumnKind::Tuple(1)) => Some(ColumnKind::Tuple(1)),
            (Some(seen), _) => {
                return Err(Error::InconsistentComponentCount {
                    column: column.name.clone(),
                    expected: kind_width(seen),
                    found: cell.width(),
                    row,
                });
            }
        };
    }

    Ok(kind.unwrap_or(ColumnKind::Scalar))
}

fn kind_width(kind: ColumnKind) -> usize {
    match kind {
        ColumnKind::Scalar => 1,
        ColumnKind::Tuple(width) => width,
    }
}

/// Replace every tuple column with its scalar components
pub fn expand(raw: RawTable) -> Result<Table> {
    let kinds = raw
        .columns
        .iter()
        .map(classify)
        .collect::<Result<Vec<_>>>()?;

    let mut columns = Vec::with_capacity(raw.columns.len());
    for (column, kind) in raw.columns.into_iter().zip(kinds) {
        match kind {
            ColumnKind::Scalar => columns.push(scalar_column(column)),
            ColumnKind::Tuple(width) => {
                debug!("Expanding column '{}' into {} components", column.name, width);
                columns.extend(component_columns(column, width));
            }
        }
    }

    Table::new(raw.index, columns, raw.sources)
}

/// Convert a raw table that holds no tuple cells
pub(crate) fn into_scalar_table(raw: RawTable) -> Result<Table> {
    let columns = raw.columns.into_iter().map(scalar_column).collect();
    Table::new(raw.index, columns, raw.sources)
}

fn scalar_column(column: RawColumn) -> Column {
    let values = column
        .cells
        .into_iter()
        .map(|cell| match cell {
            RawCell::Scalar(value) => value,
            _ => f64::NAN,
        })
        .collect();
    Column::new(column.name, values)
}

fn component_columns(column: RawColumn, width: usize) -> Vec<Column> {
    let mut components: Vec<Vec<f64>> = vec![Vec::with_capacity(column.cells.len()); width];

    for cell in &column.cells {
        match cell {
            RawCell::Tuple(values) => {
                for (component, value) in components.iter_mut().zip(values) {
                    component.push(*value);
                }
            }
            RawCell::Scalar(value) => components[0].push(*value),
            RawCell::Missing => components.iter_mut().for_each(|c| c.push(f64::NAN)),
        }
    }

    components
        .into_iter()
        .enumerate()
        .map(|(i, values)| Column::new(format!("{}.{}", column.name, i), values))
        .collect()
}
