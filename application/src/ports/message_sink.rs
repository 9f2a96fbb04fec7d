//! Live message sink port
//!
//! Overwrites the visible text of an existing chat message. Every push is a
//! full-content overwrite, so concurrent pushes never interleave within one
//! message; the last one applied wins.

use async_trait::async_trait;
use reply_domain::Message;
use thiserror::Error;

/// Errors returned by a message sink
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Sink rejected update: {0}")]
    Rejected(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Transport error: {0}")]
    Transport(String),
}

/// One overwrite of a live chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageUpdate {
    pub conversation_id: String,
    pub message_id: String,
    /// Full text to display
    pub text: String,
    /// Transcript as of this render
    pub transcript: Vec<Message>,
    /// User the answer is addressed to
    pub author_id: String,
}

/// Destination for live message edits
#[async_trait]
pub trait LiveMessageSink: Send + Sync {
    async fn push(&self, update: &MessageUpdate) -> Result<(), SinkError>;
}
