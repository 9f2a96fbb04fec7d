//! Error types for the Slack Web API adapter

use reply_application::SinkError;
use thiserror::Error;

/// Result type alias for Slack operations
pub type Result<T> = std::result::Result<T, SlackError>;

/// Errors that can occur when calling the Slack Web API
#[derive(Error, Debug)]
pub enum SlackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Slack API error: {0}")]
    Api(String),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Response missing field: {0}")]
    MissingField(&'static str),
}

impl From<SlackError> for SinkError {
    fn from(error: SlackError) -> Self {
        match error {
            SlackError::Api(reason) => SinkError::Rejected(reason),
            SlackError::RateLimited { .. } => SinkError::RateLimited,
            other => SinkError::Transport(other.to_string()),
        }
    }
}
