use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

use crate::validation::ValidationError;

/// Failure talking to the Lighthouse API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("could not reach {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl ApiError {
    /// Only a server we cannot talk to at all ends the process. Everything
    /// else degrades to a missing value for the cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ApiError::Unreachable { .. })
    }
}

/// Keep fatal errors, turn the rest into an absent value.
pub(crate) fn absent_unless_fatal<T>(result: Result<T, ApiError>) -> Result<Option<T>, ApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => {
            warn!(error = %err, "lookup failed, continuing without it");
            Ok(None)
        }
    }
}

/// Failure while bootstrapping the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to read answer from the console: {0}")]
    Prompt(#[source] std::io::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
