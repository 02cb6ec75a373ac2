//! File-based data source.
//!
//! Reads a status page document from disk instead of the backend. The file
//! holds the same object `/api/status` returns under `data`:
//!
//! ```json
//! { "title": "...", "description": "...", "monitors": [...], "agents": [...] }
//! ```
//!
//! The file is re-read on every fetch, so editing it updates the next cycle.

use std::path::{Path, PathBuf};

use statuswatch_types::StatusPageData;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::data::DashboardData;
use crate::error::{Error, Result};

/// A data source that reads status data from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole document.
    pub async fn status_page(&self, signal: &CancellationToken) -> Result<StatusPageData> {
        tokio::select! {
            biased;
            _ = signal.cancelled() => Err(Error::Cancelled),
            result = self.read() => result,
        }
    }

    /// The document's monitors and agents.
    pub async fn dashboard(&self, signal: &CancellationToken) -> Result<DashboardData> {
        let page = self.status_page(signal).await?;
        Ok(DashboardData {
            monitors: page.monitors,
            agents: page.agents,
        })
    }

    async fn read(&self) -> Result<StatusPageData> {
        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::NetworkFailure(format!("Read error: {}", e)))?;

        let page: StatusPageData = serde_json::from_slice(&content)
            .map_err(|e| Error::MalformedPayload(format!("Parse error: {}", e)))?;

        debug!(path = %self.path.display(), monitors = page.monitors.len(), agents = page.agents.len(), "File read");
        Ok(page)
    }
}
