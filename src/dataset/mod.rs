//! Dataset module
//!
//! The in-memory record model every exporter reads from.
//!
//! # Overview
//!
//! - [`GeneratedDataset`] - a named sequence of records
//! - [`Record`] - an insertion-ordered column → value map
//! - [`Value`] - one cell (null, boolean, integer, float, text, composite)
//!
//! Datasets arrive as JSON, either a single `{"name", "data"}` object or an
//! array of them (the generation collaborator's response shape).

mod types;

pub use types::{GeneratedDataset, Record, Value};

use crate::error::{Error, Result, ResultExt};
use std::fs;
use std::path::Path;

/// Parse one dataset or an array of datasets from a JSON string
///
/// Both `name` and `data` are required, and a record may not repeat a column.
pub fn load_datasets_from_str(json: &str) -> Result<Vec<GeneratedDataset>> {
    // Dispatch on the opening bracket so decode errors keep their location
    let parsed = if json.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<GeneratedDataset>>(json)
    } else {
        serde_json::from_str::<GeneratedDataset>(json).map(|dataset| vec![dataset])
    };

    parsed.map_err(|e| Error::validation(format!("Invalid dataset JSON: {e}")))
}

/// Load datasets from a JSON file
pub fn load_datasets(path: impl AsRef<Path>) -> Result<Vec<GeneratedDataset>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file '{}'", path.display()))?;
    load_datasets_from_str(&content)
}
