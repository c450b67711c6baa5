//! File-save capability

use crate::error::{Error, Result};
use crate::export::ExportFile;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Somewhere rendered export files can be saved
///
/// Exporters never touch storage themselves; they hand an [`ExportFile`] to
/// a sink and get back a printable location.
#[async_trait]
pub trait FileSink: Send + Sync {
    /// Save a file, returning where it landed
    async fn save(&self, file: &ExportFile) -> Result<String>;
}

#[async_trait]
impl<T: FileSink + ?Sized> FileSink for Arc<T> {
    async fn save(&self, file: &ExportFile) -> Result<String> {
        (**self).save(file).await
    }
}

/// Reject file names that would escape the sink's directory
pub(crate) fn ensure_plain_filename(filename: &str) -> Result<()> {
    if filename.is_empty() || filename.contains(['/', '\\']) {
        return Err(Error::output(format!(
            "Refusing to save file with unsafe name {filename:?}"
        )));
    }
    Ok(())
}

/// Sink that keeps saved files in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<ExportFile>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All files saved so far, in save order
    pub fn files(&self) -> Vec<ExportFile> {
        self.files
            .lock()
            .map(|files| files.clone())
            .unwrap_or_default()
    }

    /// The most recently saved file with this name
    pub fn get(&self, filename: &str) -> Option<ExportFile> {
        self.files()
            .into_iter()
            .rev()
            .find(|file| file.filename == filename)
    }
}

#[async_trait]
impl FileSink for MemorySink {
    async fn save(&self, file: &ExportFile) -> Result<String> {
        ensure_plain_filename(&file.filename)?;
        self.files
            .lock()
            .map_err(|_| Error::output("Memory sink lock poisoned"))?
            .push(file.clone());
        Ok(format!("memory://{}", file.filename))
    }
}
