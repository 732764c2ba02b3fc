//! Row concatenation of tables loaded from repeated runs

use crate::error::Result;
use crate::table::{Column, Table};
use std::collections::HashMap;
use tracing::warn;

/// Concatenate tables row-wise, in the order given
///
/// Index values are kept as they are; overlapping times from restarted runs
/// are not deduplicated. Columns are the union of all tables in first-seen
/// order; a column a table lacks is NaN for that table's rows.
pub fn concat_tables(tables: Vec<Table>) -> Result<Table> {
    let Some(first) = tables.first() else {
        return Table::new(Column::new("", Vec::new()), Vec::new(), Vec::new());
    };

    let index_name = first.index.name.clone();

    // Build unified column list (union of all columns)
    let mut column_names: Vec<String> = Vec::new();
    let mut column_index: HashMap<String, usize> = HashMap::new();
    for table in &tables {
        if table.index.name != index_name {
            warn!(
                "Index column '{}' in {:?} differs from '{}'",
                table.index.name, table.sources, index_name
            );
        }
        for column in &table.columns {
            if !column_index.contains_key(&column.name) {
                column_index.insert(column.name.clone(), column_names.len());
                column_names.push(column.name.clone());
            }
        }
    }

    let total_rows: usize = tables.iter().map(Table::row_count).sum();
    let mut index = Vec::with_capacity(total_rows);
    let mut values: Vec<Vec<f64>> = vec![Vec::with_capacity(total_rows); column_names.len()];
    let mut sources = Vec::new();

    for table in tables {
        let rows = table.row_count();
        let mut filled = vec![false; column_names.len()];

        for column in table.columns {
            let slot = column_index[&column.name];
            values[slot].extend(column.values);
            filled[slot] = true;
        }
        for (slot, done) in filled.into_iter().enumerate() {
            if !done {
                values[slot].extend(std::iter::repeat(f64::NAN).take(rows));
            }
        }

        index.extend(table.index.values);
        sources.extend(table.sources);
    }

    let columns = column_names
        .into_iter()
        .zip(values)
        .map(|(name, values)| Column::new(name, values))
        .collect();

    Table::new(Column::new(index_name, index), columns, sources)
}
