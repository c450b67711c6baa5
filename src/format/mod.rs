//! Value formatting module
//!
//! Renders single values into the two export target formats. All escaping
//! and quoting rules live here.
//!
//! - [`json_literal`] / [`json_object`] - structured-data (JSON) literals
//! - [`sql_literal`] - SQL literals (`NULL`, `TRUE`, digits, `'quoted'`)
//! - [`quote_identifier`] - identifier safety check and quoting

mod json;
mod sql;

pub use json::{json_literal, json_object};
pub use sql::{
    float_literal, is_reserved_keyword, is_safe_identifier, quote_identifier, quote_text,
    sql_literal,
};

use thiserror::Error;

/// A value with no literal in the target format
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiteralError {
    #[error("non-finite number {0} has no JSON literal")]
    NonFinite(f64),

    #[error("integer {0} exceeds the safe integer range")]
    UnsafeInteger(i64),
}
