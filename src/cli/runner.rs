//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, FormatArg, MessageFormat};
use crate::config::ExportConfig;
use crate::dataset::{load_datasets, GeneratedDataset};
use crate::error::{Error, Result, ResultExt};
use crate::export::{ExportService, SavedExport};
use crate::generate::{GenerationClient, GenerationRequest};
use crate::output::CloudDestination;
use crate::schema::infer_columns;
use crate::types::ExportFormat;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
    config: ExportConfig,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli, config: ExportConfig) -> Self {
        Self { cli, config }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Export {
                input,
                datasets,
                format,
                output,
            } => {
                let datasets = select_datasets(load_datasets(input)?, datasets.as_deref())?;
                self.export(&datasets, *format, output).await
            }
            Commands::Inspect { input } => self.inspect(input),
            Commands::Generate {
                endpoint,
                script,
                scale,
                number_max,
                format,
                output,
            } => {
                let script = fs::read_to_string(script).with_context(|| {
                    format!("Failed to read script file '{}'", script.display())
                })?;
                let request = GenerationRequest::new(script)
                    .scale(*scale)
                    .number_max(*number_max);

                let client = GenerationClient::new(endpoint)?;
                let datasets = client.generate(&request).await?;
                info!(
                    endpoint = %client.endpoint(),
                    count = datasets.len(),
                    "Generated datasets"
                );

                self.export(&datasets, *format, output).await
            }
            Commands::Serve { port } => {
                let config = crate::cli::ServerConfig {
                    export: self.config.clone(),
                };
                crate::cli::serve(config, *port).await
            }
        }
    }

    /// Export datasets to a destination, one message per file
    async fn export(
        &self,
        datasets: &[GeneratedDataset],
        format: FormatArg,
        output: &str,
    ) -> Result<()> {
        let destination = CloudDestination::parse(output)?;
        let service = ExportService::new(destination, self.config.clone());
        let formats = format.formats();

        let results = service.export_all(datasets, &formats).await;
        let total = results.len();
        let mut failed = 0;

        let attempts = datasets
            .iter()
            .flat_map(|dataset| formats.iter().map(move |format| (dataset, *format)));
        for ((dataset, format), result) in attempts.zip(results) {
            match result {
                Ok(saved) => self.output_message(&export_message(&saved)),
                Err(e) => {
                    failed += 1;
                    self.output_message(&error_message(&dataset.name, format, &e));
                }
            }
        }

        if failed > 0 {
            return Err(Error::Other(format!("{failed} of {total} exports failed")));
        }
        Ok(())
    }

    /// Print the inferred columns of every dataset in a file
    fn inspect(&self, input: &Path) -> Result<()> {
        for dataset in load_datasets(input)? {
            let columns = infer_columns(&dataset.data);
            self.output_message(&json!({
                "type": "SCHEMA",
                "dataset": dataset.name,
                "rows": dataset.len(),
                "columns": columns
            }));
        }
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.messages {
            MessageFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            MessageFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Keep the named datasets, in file order
///
/// An empty or missing selection keeps everything. Unknown names are an error.
pub(crate) fn select_datasets(
    datasets: Vec<GeneratedDataset>,
    selection: Option<&str>,
) -> Result<Vec<GeneratedDataset>> {
    let wanted: Vec<&str> = selection
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    if wanted.is_empty() {
        return Ok(datasets);
    }

    if let Some(unknown) = wanted
        .iter()
        .find(|name| !datasets.iter().any(|d| d.name == **name))
    {
        return Err(Error::config(format!("Dataset not found: {unknown}")));
    }

    Ok(datasets
        .into_iter()
        .filter(|d| wanted.contains(&d.name.as_str()))
        .collect())
}

fn export_message(saved: &SavedExport) -> Value {
    json!({
        "type": "EXPORT",
        "location": saved.location,
        "filename": saved.filename,
        "report": saved.report
    })
}

fn error_message(dataset: &str, format: ExportFormat, error: &Error) -> Value {
    json!({
        "type": "ERROR",
        "dataset": dataset,
        "format": format,
        "message": error.to_string()
    })
}
