//! Generation module
//!
//! Fetches datasets from a generation endpoint. The endpoint runs the user's
//! script and answers with a JSON array of `{name, data}` datasets.

mod client;
mod types;

pub use client::GenerationClient;
pub use types::{GenerationClientConfig, GenerationRequest, DEFAULT_NUMBER_MAX, DEFAULT_SCALE};
