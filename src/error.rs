//! Error types for polling and fetching.

use thiserror::Error;

/// Errors surfaced by fetches and by the poller.
///
/// `Clone` so the last error can be carried in poller snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The fetch was superseded by a newer refresh or torn down.
    /// Never shown to the user.
    #[error("Request cancelled")]
    Cancelled,

    /// Transport or HTTP-level failure, including backend-reported failures.
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The response did not have the expected shape.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// `start` was called on a poller that is already running.
    #[error("Poller already started for query '{0}'")]
    AlreadyStarted(String),
}

impl Error {
    /// Whether this error is a cancellation notification.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Whether this error belongs in a poller's `last_error`.
    pub fn is_reportable(&self) -> bool {
        matches!(self, Error::NetworkFailure(_) | Error::MalformedPayload(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::MalformedPayload(err.to_string())
        } else {
            Error::NetworkFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedPayload(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::NetworkFailure(err.to_string())
    }
}

/// Result alias for fetch operations.
pub type Result<T> = std::result::Result<T, Error>;
