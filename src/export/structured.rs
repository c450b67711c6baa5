//! Structured (JSON) export

use super::file::{validate_dataset, Export, ExportFile, ExportReport};
use crate::config::StructuredConfig;
use crate::dataset::GeneratedDataset;
use crate::error::{Error, Result};
use crate::format::json_object;
use crate::types::{ExportFormat, JsonValue};
use tracing::debug;

/// Render a dataset's records as one JSON document
///
/// The document is the `data` array itself, one object per record with
/// columns in record order. Fails without producing bytes if any value has
/// no JSON literal; the error names the column and the zero-based row.
pub fn export_structured(dataset: &GeneratedDataset, config: &StructuredConfig) -> Result<Export> {
    validate_dataset(dataset)?;

    let mut rows = Vec::with_capacity(dataset.len());
    for (row, record) in dataset.data.iter().enumerate() {
        let object = json_object(record, config.strict_safe_integers)
            .map_err(|(column, e)| Error::serialization(column, row, e.to_string()))?;
        rows.push(JsonValue::Object(object));
    }

    let document = JsonValue::Array(rows);
    let mut bytes = if config.pretty {
        serde_json::to_vec_pretty(&document)?
    } else {
        serde_json::to_vec(&document)?
    };
    bytes.push(b'\n');

    let mut report = ExportReport::new(&dataset.name, ExportFormat::Json);
    report.rows = dataset.len();

    debug!(
        dataset = %dataset.name,
        rows = report.rows,
        bytes = bytes.len(),
        "Rendered JSON export"
    );

    Ok(Export {
        file: ExportFile::new(&dataset.name, ExportFormat::Json, bytes),
        report,
    })
}
