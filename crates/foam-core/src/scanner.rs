//! Directory scanner for repeated-run monitoring output
//!
//! Restarted runs write the same monitoring file under one directory per
//! start time (e.g. `forces/0/forces.dat`, `forces/100/forces.dat`). A merge
//! only makes sense when every file found shares one file name.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files found below a directory, all sharing one file name
#[derive(Debug, Clone)]
pub struct DataFileSet {
    /// Directory that was scanned
    pub root: PathBuf,
    /// Shared file name (e.g., "forces.dat")
    pub file_name: String,
    /// Matching files in ascending path order
    pub paths: Vec<PathBuf>,
}

/// Collect every file with the given extension below `root`
///
/// Fails if nothing matches or if the matches do not share one file name.
pub fn collect_data_files<P: AsRef<Path>>(root: P, extension: &str) -> Result<DataFileSet> {
    let root = root.as_ref();
    let mut paths = Vec::new();
    let mut names = BTreeSet::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || !path.extension().is_some_and(|ext| ext == extension) {
            continue;
        }

        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::InvalidFileName(path.to_path_buf()))?;

        names.insert(file_name.to_string());
        paths.push(path.to_path_buf());
    }

    if paths.is_empty() {
        return Err(Error::NoDataFiles {
            path: root.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    if names.len() != 1 {
        return Err(Error::HeterogeneousDirectory {
            path: root.to_path_buf(),
            names: names.into_iter().collect(),
        });
    }

    paths.sort();
    let file_name = names.into_iter().next().unwrap_or_default();

    Ok(DataFileSet {
        root: root.to_path_buf(),
        file_name,
        paths,
    })
}
