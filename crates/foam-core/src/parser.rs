//! Tab-separated body reader shared by the `.dat` and `.xy` loaders

use crate::error::{Error, Result};
use crate::options::LoadOptions;
use crate::table::{Column, RawCell, RawColumn, RawTable};
use std::path::Path;

/// How a body is laid out relative to the file it came from
#[derive(Debug, Clone, Copy)]
pub(crate) struct BodyLayout {
    /// Lines of the source file that precede the text handed to the reader
    pub lines_before: u64,
    /// Whether the first line of the text is a column-name row
    pub has_header: bool,
    /// Whether parenthesized tuple cells are accepted
    pub allow_tuples: bool,
}

/// Column-name row read from the first line of `text`
pub(crate) fn read_header(path: &Path, text: &str) -> Result<Vec<String>> {
    let mut reader = reader_for(text, true);
    let headers = reader.headers().map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut names: Vec<String> = headers.iter().map(str::to_string).collect();
    while names.last().is_some_and(|n| n.trim().is_empty()) {
        names.pop();
    }

    if names.is_empty() {
        return Err(Error::MalformedHeader {
            path: path.to_path_buf(),
            reason: "column-name row is empty".to_string(),
        });
    }
    if let Some(position) = names.iter().position(|n| n.trim().is_empty()) {
        return Err(Error::MalformedHeader {
            path: path.to_path_buf(),
            reason: format!("column {} has no name", position),
        });
    }

    Ok(names)
}

/// Parse the rows of `text` into a raw table named by `names`
///
/// `names[0]` is the index column. Decimation and column selection from
/// `options` are applied while reading. Rows are counted from the line after
/// the header (1-based) when there is one, and from the first line (0-based)
/// when there is not, so a header-less file always keeps its first row.
pub(crate) fn parse_body(
    path: &Path,
    text: &str,
    names: &[String],
    layout: BodyLayout,
    options: &LoadOptions,
) -> Result<RawTable> {
    let positions = options.positions(names.len())?;
    let mut reader = reader_for(text, layout.has_header);

    let mut index = Vec::new();
    let mut cells: Vec<Vec<RawCell>> = vec![Vec::new(); positions.len() - 1];

    for result in reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        let reader_line = record.position().map(|p| p.line()).unwrap_or_default();
        let line = layout.lines_before + reader_line;
        // Line 1 is either the header or the first row
        if !options.keeps_row(reader_line.saturating_sub(1)) {
            continue;
        }

        let fields = trim_trailing_empty(&record, names.len());
        if fields != names.len() {
            return Err(Error::RaggedRow {
                path: path.to_path_buf(),
                line,
                expected: names.len(),
                found: fields,
            });
        }

        for (slot, &position) in positions.iter().enumerate() {
            let token = &record[position];
            let cell = RawCell::parse(token)
                .filter(|cell| layout.allow_tuples || !matches!(cell, RawCell::Tuple(_)))
                .ok_or_else(|| Error::InvalidCell {
                    path: path.to_path_buf(),
                    line,
                    column: names[position].clone(),
                    value: token.to_string(),
                })?;

            if slot == 0 {
                index.push(index_value(cell, path, line, &names[0], token)?);
            } else {
                cells[slot - 1].push(cell);
            }
        }
    }

    let columns = positions[1..]
        .iter()
        .zip(cells)
        .map(|(&position, cells)| RawColumn::new(names[position].clone(), cells))
        .collect();

    Ok(RawTable {
        index: Column::new(names[0].clone(), index),
        columns,
        sources: vec![path.to_path_buf()],
    })
}

fn reader_for(text: &str, has_headers: bool) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true) // Field count is checked per row
        .quoting(false)
        .from_reader(text.as_bytes())
}

/// Field count ignoring empty fields past the expected width
fn trim_trailing_empty(record: &csv::StringRecord, expected: usize) -> usize {
    let mut count = record.len();
    while count > expected && record[count - 1].trim().is_empty() {
        count -= 1;
    }
    count
}

fn index_value(cell: RawCell, path: &Path, line: u64, name: &str, token: &str) -> Result<f64> {
    match cell {
        RawCell::Scalar(value) => Ok(value),
        RawCell::Missing => Ok(f64::NAN),
        RawCell::Tuple(_) => Err(Error::InvalidCell {
            path: path.to_path_buf(),
            line,
            column: name.to_string(),
            value: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAT_LAYOUT: BodyLayout = BodyLayout {
        lines_before: 0,
        has_header: true,
        allow_tuples: true,
    };

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_read_header() {
        let header = read_header(Path::new("t.dat"), "# Time  \tp \t U\n1\t2\t3\n").unwrap();
        assert_eq!(header, vec!["# Time  ", "p ", " U"]);
    }

    #[test]
    fn test_read_header_trailing_tab() {
        let header = read_header(Path::new("t.dat"), "# Time\tp\t\n1\t2\t\n").unwrap();
        assert_eq!(header, vec!["# Time", "p"]);
    }

    #[test]
    fn test_read_header_unnamed_column() {
        let err = read_header(Path::new("t.dat"), "# Time\t\tp\n").unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { .. }));
    }

    #[test]
    fn test_parse_body_with_header() {
        let text = "# Time\tp\tU\n0.1\t1.5\t(1 2 3)\n0.2\t2.5\t(4 5 6)\n";
        let raw = parse_body(
            Path::new("t.dat"),
            text,
            &names(&["Time", "p", "U"]),
            DAT_LAYOUT,
            &LoadOptions::new(),
        )
        .unwrap();

        assert_eq!(raw.index.values, vec![0.1, 0.2]);
        assert_eq!(raw.columns.len(), 2);
        assert_eq!(raw.columns[0].cells[1], RawCell::Scalar(2.5));
        assert_eq!(raw.columns[1].cells[0], RawCell::Tuple(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_parse_body_decimation() {
        let text = "# t\tp\n1\t10\n2\t20\n3\t30\n4\t40\n5\t50\n";
        let raw = parse_body(
            Path::new("t.dat"),
            text,
            &names(&["t", "p"]),
            DAT_LAYOUT,
            &LoadOptions::new().with_use_nth(2),
        )
        .unwrap();

        assert_eq!(raw.index.values, vec![2.0, 4.0]);
    }

    #[test]
    fn test_parse_body_usecols() {
        let text = "# t\ta\tb\tc\td\n1\t10\t20\t30\t40\n2\t11\t21\t31\t41\n";
        let raw = parse_body(
            Path::new("t.dat"),
            text,
            &names(&["t", "a", "b", "c", "d"]),
            DAT_LAYOUT,
            &LoadOptions::new().with_usecols(vec![2]),
        )
        .unwrap();

        assert_eq!(raw.columns.len(), 1);
        assert_eq!(raw.columns[0].name, "b");
        assert_eq!(
            raw.columns[0].cells,
            vec![RawCell::Scalar(20.0), RawCell::Scalar(21.0)]
        );
    }

    #[test]
    fn test_parse_body_trailing_tab() {
        let text = "# t\tp\n1\t10\t\n";
        let raw = parse_body(
            Path::new("t.dat"),
            text,
            &names(&["t", "p"]),
            DAT_LAYOUT,
            &LoadOptions::new(),
        )
        .unwrap();

        assert_eq!(raw.columns[0].cells, vec![RawCell::Scalar(10.0)]);
    }

    #[test]
    fn test_parse_body_ragged_row() {
        let text = "# t\tp\tq\n1\t10\n";
        let err = parse_body(
            Path::new("t.dat"),
            text,
            &names(&["t", "p", "q"]),
            DAT_LAYOUT,
            &LoadOptions::new(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::RaggedRow { line: 2, expected: 3, found: 2, .. }));
    }

    #[test]
    fn test_parse_body_invalid_cell_reports_file_line() {
        let layout = BodyLayout {
            lines_before: 3,
            ..DAT_LAYOUT
        };
        let text = "# t\tp\n1\t10\n2\tabc\n";
        let err = parse_body(
            Path::new("t.dat"),
            text,
            &names(&["t", "p"]),
            layout,
            &LoadOptions::new(),
        )
        .unwrap_err();

        match err {
            Error::InvalidCell { line, column, value, .. } => {
                assert_eq!(line, 6);
                assert_eq!(column, "p");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_body_ragged_row_reports_trimmed_count() {
        let text = "# t\tp\n1\t10\t20\t\t\n";
        let err = parse_body(
            Path::new("t.dat"),
            text,
            &names(&["t", "p"]),
            DAT_LAYOUT,
            &LoadOptions::new(),
        )
        .unwrap_err();

        // Empty trailing fields are not counted
        assert!(matches!(err, Error::RaggedRow { expected: 2, found: 3, .. }));
    }

    #[test]
    fn test_parse_body_without_header_keeps_first_row() {
        let layout = BodyLayout {
            lines_before: 0,
            has_header: false,
            allow_tuples: false,
        };
        let raw = parse_body(
            Path::new("x_p.xy"),
            "0\t1\n1\t2\n2\t3\n3\t4\n",
            &names(&["x", "p"]),
            layout,
            &LoadOptions::new().with_use_nth(2),
        )
        .unwrap();

        assert_eq!(raw.index.values, vec![0.0, 2.0]);
    }

    #[test]
    fn test_parse_body_rejects_tuples_in_scalar_mode() {
        let layout = BodyLayout {
            lines_before: 0,
            has_header: false,
            allow_tuples: false,
        };
        let err = parse_body(
            Path::new("U.xy"),
            "0\t(1 2 3)\n",
            &names(&["U.0", "U.1"]),
            layout,
            &LoadOptions::new(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::InvalidCell { line: 1, .. }));
    }
}
