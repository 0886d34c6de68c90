/// Input validation for the bootstrap configuration
use std::time::Duration;

use lbp_presence_store::{PlayerName, player_name};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Server URL cannot be empty")]
    ServerUrlEmpty,

    #[error("Server URL must start with http:// or https:// (got '{0}')")]
    ServerUrlScheme(String),

    #[error("Username cannot be empty")]
    UsernameEmpty,

    #[error("Username too long (max 16 characters, got {0})")]
    UsernameTooLong(usize),

    #[error("Username contains invalid characters (only alphanumeric, '-' and '_' allowed)")]
    UsernameInvalidChars,

    #[error("Poll interval must be at least 1 second")]
    PollIntervalZero,
}

/// Validates a Lighthouse instance URL and returns it without trailing slashes
///
/// Rules:
/// - Cannot be empty
/// - Must use http or https
pub fn validate_server_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim().trim_end_matches('/');

    if url.is_empty() {
        return Err(ValidationError::ServerUrlEmpty);
    }

    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ValidationError::ServerUrlScheme(url.to_string()));
    }

    Ok(url.to_string())
}

/// Validates a registered username
///
/// Rules:
/// - Cannot be empty
/// - Max 16 characters (online id limit)
/// - Only alphanumeric characters, hyphens and underscores
pub fn validate_username(name: &str) -> Result<PlayerName, ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }

    if name.len() > 16 {
        return Err(ValidationError::UsernameTooLong(name.len()));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::UsernameInvalidChars);
    }

    player_name(name).map_err(|_| ValidationError::UsernameTooLong(name.len()))
}

/// Validates the delay between two cycles, in whole seconds
///
/// Rules:
/// - Must be at least 1 second, so the server is never polled in a tight loop
pub fn validate_poll_interval(secs: u64) -> Result<Duration, ValidationError> {
    if secs == 0 {
        return Err(ValidationError::PollIntervalZero);
    }

    Ok(Duration::from_secs(secs))
}
