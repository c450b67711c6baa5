//! Output module
//!
//! Where rendered exports go.
//!
//! # Overview
//!
//! - [`FileSink`] - the file-save capability exporters are given
//! - [`CloudDestination`] - local directory or object storage (S3, R2, GCS, Azure)
//! - [`MemorySink`] - keeps files in memory, for tests and embedding

mod cloud;
mod sink;

pub use cloud::CloudDestination;
pub use sink::{FileSink, MemorySink};
