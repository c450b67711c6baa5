//! Schema inference module
//!
//! Derives a [`ValueKind`] per column from a dataset's records.
//!
//! # Features
//!
//! - **Value Classification**: null, boolean, integer, float, text, composite
//! - **First Non-Null Wins**: early null rows do not hide the real type
//! - **Column Statistics**: null/missing counts and kind conflicts per column

mod inference;
mod types;

pub use inference::{infer, infer_columns, ColumnInferrer};
pub use types::{ColumnSchema, ValueKind, MAX_SAFE_INTEGER};
