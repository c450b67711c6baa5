//! Object-store backed file sink (local directory, S3, R2, GCS, Azure)

use super::sink::{ensure_plain_filename, FileSink};
use crate::error::{Error, Result};
use crate::export::ExportFile;
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;
use tracing::info;

/// Export destination parsed from a URL or local path
#[derive(Debug, Clone)]
pub struct CloudDestination {
    store: Arc<dyn ObjectStore>,
    /// Key prefix inside the bucket/container
    prefix: String,
    /// URL scheme, `file` for local directories
    scheme: String,
}

impl CloudDestination {
    /// Parse a destination
    ///
    /// Supported formats:
    /// - `s3://bucket/path/` - AWS S3
    /// - `r2://bucket/path/` - Cloudflare R2 (endpoint from `R2_ENDPOINT_URL`)
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `az://container/path/` - Azure Blob Storage
    /// - anything else - local directory, created if missing
    pub fn parse(url: &str) -> Result<Self> {
        let Some((scheme, rest)) = url.split_once("://") else {
            return Self::local(url);
        };
        let (bucket, prefix) = rest.split_once('/').unwrap_or((rest, ""));
        if bucket.is_empty() && scheme != "file" {
            return Err(Error::config(format!("Missing bucket in destination {url}")));
        }

        let store: Arc<dyn ObjectStore> = match scheme {
            "s3" | "r2" => {
                let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
                if scheme == "r2" {
                    if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                        builder = builder.with_endpoint(endpoint);
                    }
                }
                Arc::new(builder.build().map_err(|e| store_error(scheme, e))?)
            }
            "gs" => Arc::new(
                GoogleCloudStorageBuilder::from_env()
                    .with_bucket_name(bucket)
                    .build()
                    .map_err(|e| store_error(scheme, e))?,
            ),
            "az" => Arc::new(
                MicrosoftAzureBuilder::from_env()
                    .with_container_name(bucket)
                    .build()
                    .map_err(|e| store_error(scheme, e))?,
            ),
            "file" => return Self::local(rest),
            other => {
                return Err(Error::config(format!(
                    "Unsupported destination scheme '{other}'"
                )))
            }
        };

        Ok(Self {
            store,
            prefix: prefix.trim_end_matches('/').to_string(),
            scheme: scheme.to_string(),
        })
    }

    /// Local directory destination
    fn local(path: &str) -> Result<Self> {
        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to open local directory {path}: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Check if this is a cloud destination (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Get the scheme (s3, r2, gs, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    fn object_path(&self, filename: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(filename)
        } else {
            ObjectPath::from(format!("{}/{filename}", self.prefix))
        }
    }
}

#[async_trait]
impl FileSink for CloudDestination {
    async fn save(&self, file: &ExportFile) -> Result<String> {
        ensure_plain_filename(&file.filename)?;
        let path = self.object_path(&file.filename);

        self.store
            .put(&path, file.bytes.clone().into())
            .await
            .map_err(|e| Error::output(format!("Failed to write {path}: {e}")))?;

        let location = format!("{}://{path}", self.scheme);
        info!(location = %location, mime_type = file.mime_type, bytes = file.bytes.len(), "Saved export");
        Ok(location)
    }
}

fn store_error(scheme: &str, e: object_store::Error) -> Error {
    Error::config(format!("Failed to create {scheme} client: {e}"))
}
