//! Configuration file loading for live-reply
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LIVE_REPLY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./live-reply.toml` or `./.live-reply.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/live-reply/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_SLACK_API_BASE, FileConfig, FileLoggingConfig,
    FileModelConfig, FileSlackConfig, FileStreamConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
