//! Live message handle.
//!
//! A reference to one chat message that is edited in place while an answer
//! streams in, plus the text most recently rendered into it.

use serde::{Deserialize, Serialize};

/// One externally mutable chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveMessage {
    conversation_id: String,
    message_id: String,
    text: String,
}

impl LiveMessage {
    pub fn new(conversation_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            message_id: message_id.into(),
            text: String::new(),
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Last rendered text, without any working marker
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Record a render. Every write is a full overwrite.
    pub fn record_render(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
