//! Generation request types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of rows per dataset
pub const DEFAULT_SCALE: u32 = 10;

/// Default upper bound for generated numbers
pub const DEFAULT_NUMBER_MAX: u32 = 50;

/// Body sent to the generation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Script describing the datasets to generate
    #[serde(rename = "value")]
    pub script: String,
    /// Rows per dataset
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Upper bound for generated numbers
    #[serde(rename = "numberMax", default = "default_number_max")]
    pub number_max: u32,
}

impl GenerationRequest {
    /// Create a request with default scale and number bound
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            scale: DEFAULT_SCALE,
            number_max: DEFAULT_NUMBER_MAX,
        }
    }

    /// Set the rows per dataset
    #[must_use]
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the upper bound for generated numbers
    #[must_use]
    pub fn number_max(mut self, number_max: u32) -> Self {
        self.number_max = number_max;
        self
    }
}

fn default_scale() -> u32 {
    DEFAULT_SCALE
}

fn default_number_max() -> u32 {
    DEFAULT_NUMBER_MAX
}

/// Configuration for the generation client
#[derive(Debug, Clone)]
pub struct GenerationClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for GenerationClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            user_agent: format!("shapegen-export/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
