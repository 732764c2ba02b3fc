//! Column-name inference for header-less `.xy` files
//!
//! Sample files are named after the fields they hold, joined by `_`
//! (e.g. `line_U_p.xy`). The leading columns hold the sample coordinate:
//! either one column named after the first token, or three components of
//! it. The remaining columns are split evenly among the remaining tokens.
//!
//! The choice between those layouts is positional and tried in a fixed
//! order: one leading column, then three, then none. When more than one
//! layout divides evenly the first one wins, which can misname unusual
//! field combinations.

use crate::error::{Error, Result};
use tracing::debug;

const VECTOR_SUFFIXES: [&str; 3] = ["x", "y", "z"];
const SYMM_TENSOR_SUFFIXES: [&str; 6] = ["xx", "xy", "xz", "yy", "yz", "zz"];

/// A field name and the number of columns it spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field token from the file name
    pub name: String,
    /// Number of scalar columns
    pub components: usize,
}

impl FieldSpec {
    /// Create a new field spec
    pub fn new(name: impl Into<String>, components: usize) -> Self {
        Self {
            name: name.into(),
            components,
        }
    }

    /// Column names for each component
    ///
    /// One component keeps the bare name; vectors get `.x .y .z`,
    /// symmetric tensors `.xx .xy .xz .yy .yz .zz`, anything else
    /// numeric suffixes.
    pub fn component_names(&self) -> Vec<String> {
        match self.components {
            1 => vec![self.name.clone()],
            3 => self.suffixed(&VECTOR_SUFFIXES),
            6 => self.suffixed(&SYMM_TENSOR_SUFFIXES),
            n => (0..n).map(|i| format!("{}.{}", self.name, i)).collect(),
        }
    }

    fn suffixed(&self, suffixes: &[&str]) -> Vec<String> {
        suffixes
            .iter()
            .map(|s| format!("{}.{}", self.name, s))
            .collect()
    }
}

/// Infer the full ordered list of column names for a file stem
pub fn infer_names(stem: &str, column_count: usize) -> Result<Vec<String>> {
    let names: Vec<String> = infer_field_specs(stem, column_count)?
        .iter()
        .flat_map(FieldSpec::component_names)
        .collect();

    if names.len() != column_count {
        return Err(Error::NameCountMismatch {
            stem: stem.to_string(),
            expected: column_count,
            found: names.len(),
        });
    }

    debug!("Inferred columns for '{}': {:?}", stem, names);
    Ok(names)
}

/// Infer the fields, and how many columns each spans, for a file stem
pub fn infer_field_specs(stem: &str, column_count: usize) -> Result<Vec<FieldSpec>> {
    let fail = |reason: String| Error::NameInference {
        stem: stem.to_string(),
        column_count,
        reason,
    };

    let tokens: Vec<&str> = stem.split('_').collect();
    if tokens.iter().any(|t| t.is_empty()) {
        return Err(fail("empty field token".to_string()));
    }
    if column_count == 0 {
        return Err(fail("no columns".to_string()));
    }

    let pos = leading_columns(&tokens, column_count);
    let fields = &tokens[pos..];
    if fields.is_empty() {
        return Err(fail("no field tokens after the coordinate".to_string()));
    }

    let remaining = column_count - pos;
    if remaining % fields.len() != 0 {
        return Err(fail(format!(
            "{} columns do not split evenly across {} fields",
            remaining,
            fields.len()
        )));
    }

    let components = remaining / fields.len();
    if components == 0 {
        return Err(fail(format!(
            "{} fields but only {} columns",
            fields.len(),
            remaining
        )));
    }

    let mut specs = Vec::with_capacity(fields.len() + 1);
    if pos > 0 {
        specs.push(FieldSpec::new(tokens[0], pos));
    }
    specs.extend(fields.iter().map(|f| FieldSpec::new(*f, components)));

    Ok(specs)
}

/// Number of leading coordinate columns: 1, 3 or 0, tried in that order
fn leading_columns(tokens: &[&str], column_count: usize) -> usize {
    if divides(column_count - 1, tokens.len() - 1) {
        1
    } else if column_count > 3 && divides(column_count - 3, tokens.len().saturating_sub(3)) {
        3
    } else {
        0
    }
}

/// Whether `count` splits evenly into `parts`; zero parts never do
fn divides(count: usize, parts: usize) -> bool {
    parts != 0 && count % parts == 0
}
