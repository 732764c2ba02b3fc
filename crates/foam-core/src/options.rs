//! Load options shared by the `.dat` and `.xy` loaders

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Row decimation and column selection for a load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// 1-based data-column positions to keep, in this order; the index
    /// column is always kept. None keeps every column.
    #[serde(default)]
    pub usecols: Option<Vec<usize>>,
    /// Keep only every Nth data row. None or values below 2 keep all rows.
    #[serde(default)]
    pub use_nth: Option<usize>,
}

impl LoadOptions {
    /// Options that keep every row and column
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the load to the given data-column positions
    pub fn with_usecols(mut self, usecols: Vec<usize>) -> Self {
        self.usecols = Some(usecols);
        self
    }

    /// Keep every `n`th data row
    pub fn with_use_nth(mut self, n: usize) -> Self {
        self.use_nth = Some(n);
        self
    }

    /// Load options from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Effective decimation stride, if decimation is enabled
    pub fn stride(&self) -> Option<usize> {
        self.use_nth.filter(|&n| n >= 2)
    }

    /// Whether the data row at `offset` survives decimation
    pub fn keeps_row(&self, offset: u64) -> bool {
        match self.stride() {
            Some(n) => offset % n as u64 == 0,
            None => true,
        }
    }

    /// File column positions to read, index (0) first
    pub fn positions(&self, available: usize) -> Result<Vec<usize>> {
        let Some(usecols) = &self.usecols else {
            return Ok((0..available).collect());
        };

        let last = available.saturating_sub(1);
        let mut seen = HashSet::new();
        let mut positions = Vec::with_capacity(usecols.len() + 1);
        positions.push(0);

        for &position in usecols {
            if position == 0 || position > last {
                return Err(Error::ColumnOutOfRange { position, last });
            }
            if !seen.insert(position) {
                return Err(Error::DuplicateColumn(format!("#{}", position)));
            }
            positions.push(position);
        }

        Ok(positions)
    }
}
