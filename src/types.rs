//! Common types used throughout shapegen-export
//!
//! Shared type aliases and small enums used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Export Format
// ============================================================================

/// Target format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Standalone JSON document holding the dataset's records
    Json,
    /// Batch of SQL INSERT statements
    Sql,
}

impl ExportFormat {
    /// File extension, without the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Sql => "sql",
        }
    }

    /// Mime type handed to the file-save collaborator
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Sql => "application/sql",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// Identifier Case
// ============================================================================

/// How the target database compares unquoted identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierCase {
    /// `id` and `ID` name the same column
    #[default]
    Insensitive,
    /// Identifiers are compared byte for byte
    Sensitive,
}

impl IdentifierCase {
    /// Normalize an identifier for duplicate detection
    pub fn normalize(self, ident: &str) -> String {
        match self {
            IdentifierCase::Insensitive => ident.to_lowercase(),
            IdentifierCase::Sensitive => ident.to_string(),
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level accepted in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
