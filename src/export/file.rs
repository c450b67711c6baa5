//! Export artifacts: the rendered file and its report

use crate::dataset::GeneratedDataset;
use crate::error::{Error, Result};
use crate::types::ExportFormat;
use bytes::Bytes;
use serde::Serialize;
use std::collections::BTreeSet;

/// Base name used when a dataset name sanitizes to nothing
const FALLBACK_BASE_NAME: &str = "dataset";

/// A rendered file ready to hand to a [`FileSink`](crate::output::FileSink)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// File name without any directory component
    pub filename: String,
    /// Mime type of `bytes`
    pub mime_type: &'static str,
    /// File content
    pub bytes: Bytes,
}

impl ExportFile {
    /// Build the file for a dataset in the given format
    pub fn new(dataset_name: &str, format: ExportFormat, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: format!("{}.{}", sanitize_filename(dataset_name), format.extension()),
            mime_type: format.mime_type(),
            bytes: bytes.into(),
        }
    }

    /// File content as text (both export formats are UTF-8)
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// What happened while rendering one export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Dataset name
    pub dataset: String,
    /// Target format
    pub format: ExportFormat,
    /// Records written
    pub rows: usize,
    /// Records whose key set differed from the first record's
    pub degraded_rows: usize,
    /// Reference columns absent from a record, rendered as NULL
    pub missing_values: usize,
    /// Keys outside the reference column set, dropped from the output
    pub dropped_columns: BTreeSet<String>,
    /// Non-null values whose kind differed from their column's inferred kind
    pub kind_mismatches: usize,
}

impl ExportReport {
    /// Start an empty report
    pub fn new(dataset: &str, format: ExportFormat) -> Self {
        Self {
            dataset: dataset.to_string(),
            format,
            rows: 0,
            degraded_rows: 0,
            missing_values: 0,
            dropped_columns: BTreeSet::new(),
            kind_mismatches: 0,
        }
    }

    /// Whether any record was padded or trimmed
    pub fn is_degraded(&self) -> bool {
        self.degraded_rows > 0
    }
}

/// A rendered file plus its report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file: ExportFile,
    pub report: ExportReport,
}

/// Strip path separators and control characters from a dataset name
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\') && !c.is_control())
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.');

    if cleaned.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Reject datasets no exporter can name
pub(crate) fn validate_dataset(dataset: &GeneratedDataset) -> Result<()> {
    if dataset.name.trim().is_empty() {
        return Err(Error::validation("Dataset name cannot be empty"));
    }
    if dataset.name.chars().any(char::is_control) {
        return Err(Error::validation(format!(
            "Dataset name {:?} contains control characters",
            dataset.name
        )));
    }
    Ok(())
}
