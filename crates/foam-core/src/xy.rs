//! Loader for header-less `.xy` sample files

use crate::error::{Error, Result};
use crate::expand::into_scalar_table;
use crate::naming::infer_names;
use crate::options::LoadOptions;
use crate::parser::{parse_body, BodyLayout};
use crate::table::Table;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Column separator in sample files
pub const XY_SEPARATOR: char = '\t';

/// Count the columns on a 1-based line by counting separators
pub fn count_columns<P: AsRef<Path>>(path: P, separator: char, line_no: usize) -> Result<usize> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let not_found = || Error::LineNotFound {
        path: path.to_path_buf(),
        line: line_no,
    };

    let line = BufReader::new(file)
        .lines()
        .nth(line_no.checked_sub(1).ok_or_else(not_found)?)
        .ok_or_else(not_found)?
        .map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(line.matches(separator).count() + 1)
}

/// Load a `.xy` file, naming its columns from the file name
pub fn load_xy<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Table> {
    let path = path.as_ref();

    let column_count = count_columns(path, XY_SEPARATOR, 1)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidFileName(path.to_path_buf()))?;
    let names = infer_names(stem, column_count)?;

    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let layout = BodyLayout {
        lines_before: 0,
        has_header: false,
        allow_tuples: false,
    };
    let raw = parse_body(path, &content, &names, layout, options)?;
    debug!(
        "Read {} rows x {} columns from {}",
        raw.index.values.len(),
        raw.columns.len(),
        path.display()
    );

    into_scalar_table(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_count_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "U.xy", "0\t1\t2\t3\n1\t4\t5\n");

        assert_eq!(count_columns(&path, '\t', 1).unwrap(), 4);
        assert_eq!(count_columns(&path, '\t', 2).unwrap(), 3);
    }

    #[test]
    fn test_count_columns_without_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "p.xy", "0\t1");

        assert_eq!(count_columns(&path, '\t', 1).unwrap(), 2);
    }

    #[test]
    fn test_count_columns_missing_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "p.xy", "0\t1\n");

        assert!(matches!(
            count_columns(&path, '\t', 2),
            Err(Error::LineNotFound { line: 2, .. })
        ));
        assert!(matches!(
            count_columns(&path, '\t', 0),
            Err(Error::LineNotFound { line: 0, .. })
        ));
    }

    #[test]
    fn test_load_single_field() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "U.xy", "0\t1\t2\t3\n0.5\t4\t5\t6\n");

        let table = load_xy(&path, &LoadOptions::new()).unwrap();

        assert_eq!(table.index.name, "U.0");
        assert_eq!(table.index.values, vec![0.0, 0.5]);
        assert_eq!(table.column_names(), vec!["U.1", "U.2", "U.3"]);
        assert_eq!(table.find_column("U.3").unwrap().values, vec![3.0, 6.0]);
    }

    #[test]
    fn test_load_pressure_profile() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "p.xy", "0\t101325\n0.1\t101300\n");

        let table = load_xy(&path, &LoadOptions::new()).unwrap();

        assert_eq!(table.index.name, "p.0");
        assert_eq!(table.column_names(), vec!["p.1"]);
    }

    #[test]
    fn test_load_line_sample() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            temp_dir.path(),
            "y_U_p.xy",
            "0\t1\t0\t0\t5\n0.1\t2\t0\t0\t6\n",
        );

        // (5 - 1) % 2 == 0: one coordinate column, two components per field
        let table = load_xy(&path, &LoadOptions::new()).unwrap();

        assert_eq!(table.index.name, "y");
        assert_eq!(table.column_names(), vec!["U.0", "U.1", "p.0", "p.1"]);
    }

    #[test]
    fn test_load_vector_sample() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "x_U.xy", "0\t1\t2\t3\n1\t4\t5\t6\n");

        let table = load_xy(&path, &LoadOptions::new()).unwrap();

        assert_eq!(table.index.name, "x");
        assert_eq!(table.column_names(), vec!["U.x", "U.y", "U.z"]);
        assert_eq!(table.find_column("U.y").unwrap().values, vec![2.0, 5.0]);
    }

    #[test]
    fn test_load_use_nth_and_usecols() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            temp_dir.path(),
            "x_U.xy",
            "0\t1\t2\t3\n1\t4\t5\t6\n2\t7\t8\t9\n3\t10\t11\t12\n",
        );

        let options = LoadOptions::new().with_use_nth(2).with_usecols(vec![3]);
        let table = load_xy(&path, &options).unwrap();

        // Rows 0 and 2: the first row is always kept
        assert_eq!(table.index.values, vec![0.0, 2.0]);
        assert_eq!(table.column_names(), vec!["U.z"]);
        assert_eq!(table.find_column("U.z").unwrap().values, vec![3.0, 9.0]);
    }

    #[test]
    fn test_load_incompatible_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "a_b_c.xy", "0\t1\t2\t3\n");

        let err = load_xy(&path, &LoadOptions::new()).unwrap_err();
        assert!(matches!(err, Error::NameInference { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_xy("/nonexistent/x_p.xy", &LoadOptions::new()).unwrap_err();
        match err {
            Error::FileRead { path, source } => {
                assert_eq!(path, PathBuf::from("/nonexistent/x_p.xy"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_ragged_row() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "x_p.xy", "0\t1\n1\n");

        let err = load_xy(&path, &LoadOptions::new()).unwrap_err();
        assert!(matches!(err, Error::RaggedRow { line: 2, .. }));
    }
}
