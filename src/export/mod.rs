//! Export module
//!
//! Turns a [`GeneratedDataset`](crate::dataset::GeneratedDataset) into a
//! downloadable file.
//!
//! # Overview
//!
//! - [`export_structured`] - JSON document of the dataset's records
//! - [`export_sql`] - batch of INSERT statements
//! - [`ExportService`] - render, then save through a [`FileSink`](crate::output::FileSink)
//!
//! Rendering is pure: the same dataset and configuration always produce the
//! same bytes, and the dataset is only borrowed.

mod file;
mod service;
mod sql;
mod structured;

pub use file::{sanitize_filename, Export, ExportFile, ExportReport};
pub use service::{render, ExportService, SavedExport};
pub use sql::export_sql;
pub use structured::export_structured;

#[cfg(test)]
mod tests;
