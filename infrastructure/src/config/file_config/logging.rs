//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// `tracing` filter directive (e.g. "info", "reply_application=debug")
    pub level: Option<String>,
    /// JSONL conversation log path
    pub conversation_log: Option<String>,
}
