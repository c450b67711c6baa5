// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # shapegen-export
//!
//! Deterministic export of generated tabular datasets.
//!
//! A generated dataset is a named list of records whose values may be null,
//! boolean, numeric, text or nested JSON. This crate turns one into either a
//! self-contained JSON document or a batch of SQL `INSERT` statements, and
//! hands the file to a pluggable sink.
//!
//! ## Features
//!
//! - **Column Inference**: first non-null value decides each column's kind
//! - **JSON Export**: lossless, re-decodes to the same records
//! - **SQL Export**: quoted identifiers, escaped literals, per-value dispatch
//! - **Degraded Rows**: records that don't match the first record's shape are
//!   padded or trimmed and counted, never silently
//! - **Destinations**: local directory, S3, R2, GCS, Azure
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shapegen_export::{export_sql, GeneratedDataset, Record, SqlConfig};
//!
//! let users = GeneratedDataset::new(
//!     "users",
//!     vec![
//!         Record::new().with("id", 1).with("active", true).with("bio", None::<&str>),
//!         Record::new().with("id", 2).with("active", false).with("bio", "hi"),
//!     ],
//! );
//!
//! let export = export_sql(&users, &SqlConfig::default())?;
//! println!("{}", export.file.text());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  GeneratedDataset { name, data }             │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//!              ┌─────────────────┴─────────────────┐
//!              │              Schema               │
//!              │  first non-null value per column  │
//!              └─────────────────┬─────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │                            Export                            │
//! ├──────────────────────────────┬───────────────────────────────┤
//! │ export_structured → .json    │ export_sql → .sql             │
//! │ json_literal                 │ sql_literal                   │
//! └──────────────────────────────┴───────────────────────────────┘
//!                                │
//!              ┌─────────────────┴─────────────────┐
//!              │         Output (FileSink)         │
//!              │ local │ s3 │ r2 │ gs │ az │ memory│
//!              └───────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Export configuration
pub mod config;

/// Datasets, records and values
pub mod dataset;

/// Column kind inference
pub mod schema;

/// JSON and SQL literal rendering
pub mod format;

/// Structured and SQL exporters
pub mod export;

/// File sinks and cloud destinations
pub mod output;

/// Generation endpoint client
pub mod generate;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{ExportConfig, SqlConfig, StructuredConfig};
pub use dataset::{load_datasets, load_datasets_from_str, GeneratedDataset, Record, Value};
pub use export::{export_sql, export_structured, render, Export, ExportFile, ExportReport, ExportService};
pub use output::{CloudDestination, FileSink, MemorySink};
pub use schema::{infer, infer_columns, ColumnSchema, ValueKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
