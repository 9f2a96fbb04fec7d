//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types.

mod logging;
mod model;
mod slack;
mod stream;

pub use logging::FileLoggingConfig;
pub use model::FileModelConfig;
pub use slack::{DEFAULT_SLACK_API_BASE, FileSlackConfig};
pub use stream::FileStreamConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("stream.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("stream.flush_word_threshold cannot be 0")]
    InvalidFlushThreshold,

    #[error("slack.api_base cannot be empty")]
    EmptyApiBase,

    #[error("slack.request_timeout_seconds cannot be 0")]
    InvalidRequestTimeout,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Streaming behavior
    pub stream: FileStreamConfig,
    /// Chat platform access
    pub slack: FileSlackConfig,
    /// Completion model selection
    pub model: FileModelConfig,
    /// Logging settings
    pub logging: FileLoggingConfig,
    /// System prompt template; `{bot_user_id}` is substituted
    pub system_prompt: Option<String>,
}

impl FileConfig {
    /// Validate the configuration, returning every detected issue.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        if self.stream.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }
        if self.stream.flush_word_threshold == 0 {
            issues.push(ConfigValidationError::InvalidFlushThreshold);
        }
        if self.slack.api_base.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyApiBase);
        }
        if self.slack.request_timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidRequestTimeout);
        }
        issues
    }
}
