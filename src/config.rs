//! Export configuration
//!
//! Settings for both exporters, loadable from YAML. Every field has a
//! default, so an empty document is a valid configuration.
//!
//! ```yaml
//! log_level: INFO
//! structured:
//!   pretty: true
//!   strict_safe_integers: false
//! sql:
//!   identifier_case: insensitive
//!   batch_size: 500
//!   header_comment: true
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::types::{IdentifierCase, LogLevel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete export configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default log level for the CLI (overridden by `RUST_LOG` and `--verbose`)
    #[serde(default)]
    pub log_level: Option<LogLevel>,

    /// Structured (JSON) export settings
    #[serde(default)]
    pub structured: StructuredConfig,

    /// SQL export settings
    #[serde(default)]
    pub sql: SqlConfig,
}

impl ExportConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes to null, treat it as all defaults
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ExportConfig = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate settings that serde cannot check
    pub fn validate(&self) -> Result<()> {
        if self.sql.batch_size == Some(0) {
            return Err(Error::config("sql.batch_size must be greater than zero"));
        }
        Ok(())
    }
}

// ============================================================================
// Structured Export
// ============================================================================

/// Structured (JSON) export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredConfig {
    /// Pretty-print with two-space indentation
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Reject integers beyond 2^53 - 1, which JavaScript consumers would round
    #[serde(default)]
    pub strict_safe_integers: bool,
}

impl Default for StructuredConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            strict_safe_integers: false,
        }
    }
}

// ============================================================================
// SQL Export
// ============================================================================

/// SQL export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlConfig {
    /// How the target database compares identifiers when detecting duplicates
    #[serde(default)]
    pub identifier_case: IdentifierCase,

    /// Maximum value tuples per INSERT statement (unset = one statement)
    #[serde(default)]
    pub batch_size: Option<usize>,

    /// Prefix the batch with `--` lines describing the dataset
    #[serde(default = "default_true")]
    pub header_comment: bool,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            identifier_case: IdentifierCase::default(),
            batch_size: None,
            header_comment: true,
        }
    }
}

fn default_true() -> bool {
    true
}
