//! Stream session parameters.
//!
//! [`StreamConfig`] groups the static parameters that control how
//! [`StreamReplyUseCase`](crate::use_cases::stream_reply::StreamReplyUseCase)
//! consumes fragments and pushes renders.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Marker appended to throttled renders while the answer is still streaming
pub const DEFAULT_WORKING_MARKER: &str = " ... :writing_hand:";

/// Rejected stream parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("timeout cannot be zero")]
    ZeroTimeout,

    #[error("flush_word_threshold cannot be zero")]
    ZeroFlushThreshold,
}

/// Streaming session parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Wall-clock bound on fragment production, measured from session start.
    pub timeout: Duration,
    /// Words accumulated between two throttled renders.
    pub flush_word_threshold: usize,
    /// Convert between chat markup and Markdown when rendering.
    pub translate_markdown: bool,
    /// Cap on throttled renders in flight at once (`0` = no cap).
    pub max_in_flight_updates: usize,
    /// Suffix shown on throttled renders, never on the final render.
    pub working_marker: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            flush_word_threshold: 10,
            translate_markdown: true,
            max_in_flight_updates: 8,
            working_marker: DEFAULT_WORKING_MARKER.to_string(),
        }
    }
}

impl StreamConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        self.with_timeout(Duration::from_secs(seconds))
    }

    pub fn with_flush_word_threshold(mut self, words: usize) -> Self {
        self.flush_word_threshold = words;
        self
    }

    pub fn with_translate_markdown(mut self, translate: bool) -> Self {
        self.translate_markdown = translate;
        self
    }

    pub fn with_max_in_flight_updates(mut self, max: usize) -> Self {
        self.max_in_flight_updates = max;
        self
    }

    pub fn with_working_marker(mut self, marker: impl Into<String>) -> Self {
        self.working_marker = marker.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.flush_word_threshold == 0 {
            return Err(ConfigError::ZeroFlushThreshold);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = StreamConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.flush_word_threshold, 10);
        assert!(config.translate_markdown);
        assert_eq!(config.max_in_flight_updates, 8);
        assert_eq!(config.working_marker, " ... :writing_hand:");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = StreamConfig::default()
            .with_timeout_seconds(5)
            .with_flush_word_threshold(3)
            .with_translate_markdown(false)
            .with_max_in_flight_updates(0);

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.flush_word_threshold, 3);
        assert!(!config.translate_markdown);
        assert_eq!(config.max_in_flight_updates, 0);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = StreamConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        let config = StreamConfig::default().with_flush_word_threshold(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroFlushThreshold));
    }
}
