//! Application layer for live-reply
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConfigError, StreamConfig};
pub use ports::{
    completion_provider::{CompletionProvider, ProviderError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    fragment_source::{ErrorFragmentSource, FragmentSource, SourceError, StreamFragmentSource},
    message_sink::{LiveMessageSink, MessageUpdate, SinkError},
};
pub use use_cases::invoke::invoke_completion;
pub use use_cases::stream_reply::{
    StreamReplyError, StreamReplyInput, StreamReplyOutput, StreamReplyUseCase,
};
pub use use_cases::update_scheduler::{DrainReport, UpdateScheduler};
pub use use_cases::write_answer::WriteAnswerUseCase;
