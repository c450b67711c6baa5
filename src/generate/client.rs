//! HTTP client for the dataset generation endpoint

use super::types::{GenerationClientConfig, GenerationRequest};
use crate::dataset::GeneratedDataset;
use crate::error::{Error, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Client that asks a generation endpoint for datasets
pub struct GenerationClient {
    client: Client,
    endpoint: Url,
}

impl GenerationClient {
    /// Create a client for the given endpoint URL
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_config(endpoint, GenerationClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(endpoint: &str, config: GenerationClientConfig) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Generation endpoint must be http or https, got '{}'",
                endpoint.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Generate datasets for a script
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedDataset>> {
        debug!(
            endpoint = %self.endpoint,
            scale = request.scale,
            number_max = request.number_max,
            "Requesting generated datasets"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.bytes().await?;
        let datasets: Vec<GeneratedDataset> = serde_json::from_slice(&body)?;

        debug!(count = datasets.len(), "Received generated datasets");
        Ok(datasets)
    }
}
