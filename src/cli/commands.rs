//! CLI commands and argument parsing

use crate::config::ExportConfig;
use crate::error::Result;
use crate::generate::{DEFAULT_NUMBER_MAX, DEFAULT_SCALE};
use crate::types::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Export generated datasets as JSON documents or SQL INSERT batches
#[derive(Parser, Debug)]
#[command(name = "shapegen-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Export configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// How result messages are printed
    #[arg(short, long, global = true, default_value = "json")]
    pub messages: MessageFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load the export configuration named by `--config`, or the defaults
    pub fn load_config(&self) -> Result<ExportConfig> {
        let config = match &self.config {
            Some(path) => ExportConfig::from_file(path)?,
            None => ExportConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export datasets from a JSON file
    Export {
        /// Dataset file: one `{name, data}` object or an array of them
        #[arg(short, long)]
        input: PathBuf,

        /// Datasets to export (comma-separated, empty = all)
        #[arg(long)]
        datasets: Option<String>,

        /// Export format
        #[arg(short, long, default_value = "both")]
        format: FormatArg,

        /// Output destination (local path or cloud URL)
        /// Supports: /path, s3://bucket/path, r2://bucket/path, gs://bucket/path, az://container/path
        #[arg(short, long, default_value = "exports")]
        output: String,
    },

    /// Show the inferred columns of each dataset
    Inspect {
        /// Dataset file: one `{name, data}` object or an array of them
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Generate datasets from a script, then export them
    Generate {
        /// Generation endpoint URL
        #[arg(short, long)]
        endpoint: String,

        /// Script file describing the datasets
        #[arg(short, long)]
        script: PathBuf,

        /// Rows per dataset
        #[arg(long, default_value_t = DEFAULT_SCALE)]
        scale: u32,

        /// Upper bound for generated numbers
        #[arg(long, default_value_t = DEFAULT_NUMBER_MAX)]
        number_max: u32,

        /// Export format
        #[arg(short, long, default_value = "both")]
        format: FormatArg,

        /// Output destination (local path or cloud URL)
        #[arg(short, long, default_value = "exports")]
        output: String,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Export format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    /// Structured JSON document
    Json,
    /// SQL INSERT statements
    Sql,
    /// Both files
    Both,
}

impl FormatArg {
    /// Formats to render, in output order
    pub fn formats(self) -> Vec<ExportFormat> {
        match self {
            FormatArg::Json => vec![ExportFormat::Json],
            FormatArg::Sql => vec![ExportFormat::Sql],
            FormatArg::Both => vec![ExportFormat::Json, ExportFormat::Sql],
        }
    }
}

/// Message output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MessageFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
