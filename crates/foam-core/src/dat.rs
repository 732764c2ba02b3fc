//! Loader for `.dat` monitoring files
//!
//! A `.dat` file opens with `#` comment lines, the last of which names the
//! columns. Rows are tab-separated, the first column is the index (usually
//! time) and any cell may be a parenthesized vector or tensor.

use crate::error::{Error, Result};
use crate::expand::expand;
use crate::header::find_header_boundary;
use crate::merger::concat_tables;
use crate::options::LoadOptions;
use crate::parser::{parse_body, read_header, BodyLayout};
use crate::scanner::collect_data_files;
use crate::table::Table;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Comment marker opening every header line
pub const COMMENT_MARKER: &str = "#";

/// Extension of files merged when loading a directory
pub const DAT_EXTENSION: &str = "dat";

/// Load a `.dat` file, or merge every same-named `.dat` file below a directory
pub fn load_dat<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Table> {
    let path = path.as_ref();

    if path.is_dir() {
        return load_dat_dir(path, options);
    }

    load_dat_file(path, options)
}

fn load_dat_dir(root: &Path, options: &LoadOptions) -> Result<Table> {
    let set = collect_data_files(root, DAT_EXTENSION)?;
    info!(
        "Merging {} '{}' files below {}",
        set.paths.len(),
        set.file_name,
        root.display()
    );

    let tables = set
        .paths
        .iter()
        .map(|path| load_dat_file(path, options))
        .collect::<Result<Vec<_>>>()?;

    concat_tables(tables)
}

fn load_dat_file(path: &Path, options: &LoadOptions) -> Result<Table> {
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let boundary = find_header_boundary(&content, COMMENT_MARKER, path)?;
    let text = skip_lines(&content, boundary);
    let names = column_names(read_header(path, text)?);

    let layout = BodyLayout {
        lines_before: boundary as u64,
        has_header: true,
        allow_tuples: true,
    };
    let raw = parse_body(path, text, &names, layout, options)?;
    debug!(
        "Read {} rows x {} columns from {}",
        raw.index.values.len(),
        raw.columns.len(),
        path.display()
    );

    expand(raw)
}

/// Strip header decoration: the comment marker from the index name and
/// surrounding whitespace from every name
fn column_names(header: Vec<String>) -> Vec<String> {
    header
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            if i == 0 {
                name.replace(COMMENT_MARKER, "").trim().to_string()
            } else {
                name.trim().to_string()
            }
        })
        .collect()
}

/// The suffix of `content` starting at zero-based line `count`
fn skip_lines(content: &str, count: usize) -> &str {
    let offset: usize = content
        .split_inclusive('\n')
        .take(count)
        .map(str::len)
        .sum();
    &content[offset..]
}
