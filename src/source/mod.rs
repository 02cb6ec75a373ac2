//! Where status data comes from.
//!
//! Two sources feed the pollers: the backend HTTP API ([`ApiClient`]) and a
//! JSON document on disk ([`FileSource`]) for offline use. Both accept a
//! cancellation signal on every fetch and map failures onto the same
//! [`Error`](crate::Error) taxonomy.

mod file;
mod http;

pub use file::FileSource;
pub use http::{ApiClient, ApiClientBuilder, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

use statuswatch_types::{Envelope, StatusPageData};
use tokio_util::sync::CancellationToken;

use crate::data::DashboardData;
use crate::error::{Error, Result};

/// Message used when the backend reports failure without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "failed to fetch status data";

/// A configured status source.
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub enum Source {
    Http(ApiClient),
    File(FileSource),
}

impl Source {
    /// Monitors and agents for the dashboard page.
    pub async fn dashboard(&self, signal: &CancellationToken) -> Result<DashboardData> {
        match self {
            Source::Http(client) => client.dashboard(signal).await,
            Source::File(file) => file.dashboard(signal).await,
        }
    }

    /// Payload for the public status page.
    pub async fn status_page(&self, signal: &CancellationToken) -> Result<StatusPageData> {
        match self {
            Source::Http(client) => client.status_page(signal).await,
            Source::File(file) => file.status_page(signal).await,
        }
    }

    /// Human-readable description for the status bar.
    pub fn description(&self) -> String {
        match self {
            Source::Http(client) => client.endpoint().to_string(),
            Source::File(file) => format!("file: {}", file.path().display()),
        }
    }
}

impl From<ApiClient> for Source {
    fn from(client: ApiClient) -> Self {
        Source::Http(client)
    }
}

impl From<FileSource> for Source {
    fn from(file: FileSource) -> Self {
        Source::File(file)
    }
}

/// Unwrap a `{ success, <field>?, message? }` envelope.
pub(crate) fn open_envelope<E: Envelope>(envelope: E, field: &str) -> Result<E::Payload> {
    match envelope.into_parts() {
        (true, Some(payload), _) => Ok(payload),
        (true, None, _) => Err(Error::MalformedPayload(format!(
            "response is missing `{}`",
            field
        ))),
        (false, _, message) => Err(Error::NetworkFailure(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        )),
    }
}
