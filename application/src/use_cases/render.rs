//! Rendering accumulated answer text into the live message.
//!
//! Shared by the streaming and write-answer use cases. A [`RenderTarget`] is
//! cheap to clone and owns everything a background render needs, so a
//! dispatched unit never borrows from the pull loop.

use crate::ports::message_sink::{LiveMessageSink, MessageUpdate, SinkError};
use reply_domain::{LiveMessage, Message, to_external};
use std::sync::{Arc, Mutex, PoisonError};

/// Where and how renders are pushed
#[derive(Clone)]
pub(crate) struct RenderTarget {
    sink: Arc<dyn LiveMessageSink>,
    message: Arc<Mutex<LiveMessage>>,
    author_id: Arc<str>,
    translate_markdown: bool,
}

impl RenderTarget {
    pub(crate) fn new(
        sink: Arc<dyn LiveMessageSink>,
        message: LiveMessage,
        author_id: &str,
        translate_markdown: bool,
    ) -> Self {
        Self {
            sink,
            message: Arc::new(Mutex::new(message)),
            author_id: Arc::from(author_id),
            translate_markdown,
        }
    }

    /// Translate provider text for display
    pub(crate) fn render(&self, content: &str) -> String {
        to_external(content, self.translate_markdown)
    }

    /// Translate `content` and push it with a trailing `suffix`.
    pub(crate) async fn push(
        &self,
        content: &str,
        suffix: &str,
        transcript: Vec<Message>,
    ) -> Result<(), SinkError> {
        let rendered = self.render(content);
        self.push_rendered(rendered, suffix, transcript).await
    }

    /// Push text that is already translated.
    pub(crate) async fn push_rendered(
        &self,
        rendered: String,
        suffix: &str,
        transcript: Vec<Message>,
    ) -> Result<(), SinkError> {
        let update = {
            let mut message = self.message.lock().unwrap_or_else(PoisonError::into_inner);
            let text = format!("{}{}", rendered, suffix);
            message.record_render(rendered);
            MessageUpdate {
                conversation_id: message.conversation_id().to_string(),
                message_id: message.message_id().to_string(),
                text,
                transcript,
                author_id: self.author_id.to_string(),
            }
        };
        self.sink.push(&update).await
    }

    /// Current state of the live message handle
    pub(crate) fn message(&self) -> LiveMessage {
        self.message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
