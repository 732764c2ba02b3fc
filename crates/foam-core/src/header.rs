//! Comment-block scanning for `.dat` headers
//!
//! Monitoring `.dat` files open with a block of comment lines; the last of
//! them carries the column names. The boundary returned here is the index of
//! that name row.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Find the zero-based line index of the column-name row in a file
pub fn header_boundary<P: AsRef<Path>>(path: P, comment: &str) -> Result<usize> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let lines = BufReader::new(file).lines().map(|line| {
        line.map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })
    });

    scan_lines(lines, comment, path)
}

/// Same as [`header_boundary`], over content already in memory
pub fn find_header_boundary(content: &str, comment: &str, path: &Path) -> Result<usize> {
    scan_lines(content.lines().map(Ok), comment, path)
}

fn scan_lines<I, S>(lines: I, comment: &str, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = Result<S>>,
    S: AsRef<str>,
{
    let mut seen_any = false;

    for (index, line) in lines.into_iter().enumerate() {
        let line = line?;
        seen_any = true;

        if line.as_ref().starts_with(comment) {
            continue;
        }

        if index == 0 {
            return Err(Error::MalformedHeader {
                path: path.to_path_buf(),
                reason: format!("first line does not start with '{}'", comment),
            });
        }

        debug!("Header of {} ends at line {}", path.display(), index - 1);
        return Ok(index - 1);
    }

    let reason = if seen_any {
        "no data rows after the comment block"
    } else {
        "file is empty"
    };

    Err(Error::MalformedHeader {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    })
}
