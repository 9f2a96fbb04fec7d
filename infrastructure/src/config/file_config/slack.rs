//! Chat platform configuration from TOML (`[slack]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SLACK_API_BASE: &str = "https://slack.com/api";

/// Raw Slack Web API configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSlackConfig {
    /// Bot User OAuth Token (xoxb-...)
    pub bot_token: Option<String>,
    /// Web API base URL
    pub api_base: String,
    /// Retries for a rate-limited call
    pub max_retries: u32,
    /// Deadline for one Web API request
    pub request_timeout_seconds: u64,
}

impl Default for FileSlackConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base: DEFAULT_SLACK_API_BASE.to_string(),
            max_retries: 2,
            request_timeout_seconds: 10,
        }
    }
}

impl FileSlackConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// The bot token, if one is configured and non-empty
    pub fn token(&self) -> Option<&str> {
        self.bot_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
