//! Infrastructure layer for live-reply
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod slack;
pub mod sources;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileModelConfig,
    FileSlackConfig, FileStreamConfig,
};
pub use logging::JsonlConversationLogger;
pub use slack::{SlackError, SlackMessageSink};
pub use sources::{ChannelFragmentSource, FragmentSender, ReplayProvider};
