//! foam-core: Core library for parsing CFD monitoring output tables
//!
//! This library provides functionality to:
//! - Load `.dat` monitoring files, whose last comment line names the columns
//! - Load header-less `.xy` sample files, naming columns from the file name
//! - Expand vector/tensor cells such as `(1 2 3)` into scalar columns
//! - Merge the same `.dat` file written by restarted runs into one table

pub mod dat;
pub mod error;
pub mod expand;
pub mod header;
pub mod merger;
pub mod naming;
pub mod options;
mod parser;
pub mod scanner;
pub mod table;
pub mod xy;

pub use dat::load_dat;
pub use error::{Error, Result};
pub use expand::{classify, expand, ColumnKind};
pub use header::{find_header_boundary, header_boundary};
pub use merger::concat_tables;
pub use naming::{infer_field_specs, infer_names, FieldSpec};
pub use options::LoadOptions;
pub use scanner::{collect_data_files, DataFileSet};
pub use table::{Column, RawCell, RawColumn, RawTable, Table};
pub use xy::{count_columns, load_xy};

use std::path::Path;

/// Load a data file by extension: directories and `.dat` files go to
/// [`load_dat`], `.xy` files to [`load_xy`]
pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Table> {
    let path = path.as_ref();

    if path.is_dir() {
        return load_dat(path, options);
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some(dat::DAT_EXTENSION) => load_dat(path, options),
        Some("xy") => load_xy(path, options),
        _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
    }
}
