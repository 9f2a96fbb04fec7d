//! Write Answer use case.
//!
//! Renders an answer that arrived in one piece (no streaming) into the live
//! message. The message briefly shows the answer with the working marker,
//! then the final render replaces it.

use crate::config::StreamConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::message_sink::LiveMessageSink;
use crate::use_cases::render::RenderTarget;
use crate::use_cases::stream_reply::{StreamReplyError, StreamReplyInput};
use crate::use_cases::update_scheduler::UpdateScheduler;
use reply_domain::{Message, Transcript};
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for writing a complete answer into a live message
pub struct WriteAnswerUseCase {
    sink: Arc<dyn LiveMessageSink>,
    config: StreamConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl WriteAnswerUseCase {
    pub fn new(sink: Arc<dyn LiveMessageSink>, config: StreamConfig) -> Self {
        Self {
            sink,
            config,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Append `answer` as the assistant turn and render it.
    ///
    /// Returns the final render. The assistant turn is frozen to it.
    pub async fn execute(
        &self,
        input: StreamReplyInput,
        transcript: &mut Transcript,
        answer: &str,
    ) -> Result<String, StreamReplyError> {
        let target = RenderTarget::new(
            Arc::clone(&self.sink),
            input.message,
            &input.author_id,
            self.config.translate_markdown,
        );
        transcript.append(Message::assistant(answer));

        let mut scheduler = UpdateScheduler::new(self.config.max_in_flight_updates);
        {
            let target = target.clone();
            let content = answer.to_string();
            let snapshot = transcript.snapshot();
            let marker = self.config.working_marker.clone();
            scheduler
                .dispatch(async move { target.push(&content, &marker, snapshot).await })
                .await;
        }
        scheduler.drain().await;

        let final_text = target.render(answer);
        if let Err(e) = transcript.mutate_last(final_text.clone()) {
            warn!("Could not freeze assistant turn: {}", e);
        }
        let result = target
            .push_rendered(final_text.clone(), "", transcript.snapshot())
            .await;

        info!("Answer written ({} bytes)", final_text.len());
        let message = target.message();
        self.conversation_logger.log(ConversationEvent::new(
            "answer_written",
            serde_json::json!({
                "conversation_id": message.conversation_id(),
                "message_id": message.message_id(),
                "bytes": final_text.len(),
                "final_push_ok": result.is_ok(),
                "text": final_text,
            }),
        ));

        result.map_err(StreamReplyError::FinalPushFailed)?;
        Ok(final_text)
    }
}
