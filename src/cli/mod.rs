//! CLI module
//!
//! Command-line interface for exporting datasets.
//!
//! # Commands
//!
//! - `export` - Export datasets from a JSON file
//! - `inspect` - Show inferred columns
//! - `generate` - Generate datasets from a script, then export them
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, FormatArg, MessageFormat};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
