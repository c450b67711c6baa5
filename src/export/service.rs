//! Render-and-save orchestration

use super::file::{Export, ExportReport};
use super::{export_structured, export_sql};
use crate::config::ExportConfig;
use crate::dataset::GeneratedDataset;
use crate::error::Result;
use crate::output::FileSink;
use crate::types::ExportFormat;
use serde::Serialize;
use tracing::info;

/// Outcome of one saved export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedExport {
    /// Where the sink put the file
    pub location: String,
    /// Saved file name
    pub filename: String,
    /// Rendering report
    pub report: ExportReport,
}

/// Render a dataset in the given format
pub fn render(
    dataset: &GeneratedDataset,
    format: ExportFormat,
    config: &ExportConfig,
) -> Result<Export> {
    match format {
        ExportFormat::Json => export_structured(dataset, &config.structured),
        ExportFormat::Sql => export_sql(dataset, &config.sql),
    }
}

/// Exporter bound to a file sink and a configuration
pub struct ExportService<S> {
    sink: S,
    config: ExportConfig,
}

impl<S: FileSink> ExportService<S> {
    /// Create a service
    pub fn new(sink: S, config: ExportConfig) -> Self {
        Self { sink, config }
    }

    /// The sink files are saved to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The active configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render a dataset without saving it
    pub fn render(&self, dataset: &GeneratedDataset, format: ExportFormat) -> Result<Export> {
        render(dataset, format, &self.config)
    }

    /// Render a dataset and save it through the sink
    ///
    /// Nothing reaches the sink if rendering fails.
    pub async fn export(
        &self,
        dataset: &GeneratedDataset,
        format: ExportFormat,
    ) -> Result<SavedExport> {
        let Export { file, report } = self.render(dataset, format)?;
        let location = self.sink.save(&file).await?;

        info!(
            dataset = %dataset.name,
            format = %format,
            rows = report.rows,
            degraded_rows = report.degraded_rows,
            "Exported dataset"
        );

        Ok(SavedExport {
            location,
            filename: file.filename,
            report,
        })
    }

    /// Export every dataset in every requested format
    ///
    /// Each (dataset, format) pair succeeds or fails on its own, so a JSON
    /// serialization failure does not prevent the SQL file from being saved.
    pub async fn export_all(
        &self,
        datasets: &[GeneratedDataset],
        formats: &[ExportFormat],
    ) -> Vec<Result<SavedExport>> {
        let mut results = Vec::with_capacity(datasets.len() * formats.len());
        for dataset in datasets {
            for &format in formats {
                results.push(self.export(dataset, format).await);
            }
        }
        results
    }
}
