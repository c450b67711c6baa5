//! Schema types

use serde::{Deserialize, Serialize};

/// Largest integer an IEEE-754 double holds without precision loss (2^53 - 1)
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Inferred semantic type of a value or column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    Text,
    Composite,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Null => write!(f, "null"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Text => write!(f, "text"),
            ValueKind::Composite => write!(f, "composite"),
        }
    }
}

/// Inferred description of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name as it appears in the reference record
    pub name: String,

    /// Kind decided by the first non-null value
    pub kind: ValueKind,

    /// Rows holding an explicit null
    pub null_count: usize,

    /// Rows where the column is absent
    pub missing_count: usize,

    /// A later non-null value had a different kind than `kind`
    pub conflicting: bool,
}

impl ColumnSchema {
    /// Whether the column holds null or is absent in at least one row
    pub fn is_nullable(&self) -> bool {
        self.null_count > 0 || self.missing_count > 0
    }
}
