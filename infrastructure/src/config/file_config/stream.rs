//! Streaming configuration from TOML (`[stream]` section)

use reply_application::StreamConfig;
use serde::{Deserialize, Serialize};

/// Raw streaming configuration from TOML
///
/// # Example
///
/// ```toml
/// [stream]
/// timeout_seconds = 30
/// flush_word_threshold = 10
/// translate_markdown = true
/// max_in_flight_updates = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStreamConfig {
    /// Deadline for one streamed answer
    pub timeout_seconds: u64,
    /// Words between two throttled message edits
    pub flush_word_threshold: usize,
    /// Convert between chat markup and Markdown
    pub translate_markdown: bool,
    /// Cap on concurrent throttled edits (0 = unbounded)
    pub max_in_flight_updates: usize,
}

impl Default for FileStreamConfig {
    fn default() -> Self {
        let defaults = StreamConfig::default();
        Self {
            timeout_seconds: defaults.timeout.as_secs(),
            flush_word_threshold: defaults.flush_word_threshold,
            translate_markdown: defaults.translate_markdown,
            max_in_flight_updates: defaults.max_in_flight_updates,
        }
    }
}

impl FileStreamConfig {
    pub fn to_stream_config(&self) -> StreamConfig {
        StreamConfig::default()
            .with_timeout_seconds(self.timeout_seconds)
            .with_flush_word_threshold(self.flush_word_threshold)
            .with_translate_markdown(self.translate_markdown)
            .with_max_in_flight_updates(self.max_in_flight_updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_to_stream_config() {
        let file = FileStreamConfig {
            timeout_seconds: 12,
            flush_word_threshold: 4,
            translate_markdown: false,
            max_in_flight_updates: 0,
        };
        let config = file.to_stream_config();
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.flush_word_threshold, 4);
        assert!(!config.translate_markdown);
        assert_eq!(config.max_in_flight_updates, 0);
    }
}
