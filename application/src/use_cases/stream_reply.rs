//! Stream Reply use case.
//!
//! Consumes a [`FragmentSource`] into the trailing assistant turn of a
//! [`Transcript`] and keeps one live chat message in step with it.
//!
//! # Flow
//!
//! 1. Append an empty assistant turn and start the deadline clock
//! 2. Pull fragments; every `flush_word_threshold` words, dispatch a
//!    throttled render (with the working marker) through the
//!    [`UpdateScheduler`]
//! 3. Stop on exhaustion, deadline or upstream failure
//! 4. Drain every dispatched render, then push the final render without
//!    the marker and freeze the assistant turn to it
//! 5. Release the source
//!
//! Steps 4 and 5 run on every path. Mid-stream failures only change the
//! reported [`StreamOutcome`]; the partial answer is still rendered.

use crate::config::{ConfigError, StreamConfig};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::fragment_source::{FragmentSource, SourceError};
use crate::ports::message_sink::{LiveMessageSink, SinkError};
use crate::use_cases::render::RenderTarget;
use crate::use_cases::update_scheduler::{DrainReport, UpdateScheduler};
use reply_domain::util::count_words;
use reply_domain::{LiveMessage, Message, PhaseTracker, StreamOutcome, StreamPhase, Transcript};
use std::sync::Arc;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Errors that can occur during a streaming session
#[derive(Error, Debug)]
pub enum StreamReplyError {
    #[error("Invalid stream configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Final render could not be pushed: {0}")]
    FinalPushFailed(SinkError),
}

/// Input for the [`StreamReplyUseCase`].
#[derive(Debug, Clone)]
pub struct StreamReplyInput {
    /// The chat message to edit in place
    pub message: LiveMessage,
    /// User the answer is addressed to
    pub author_id: String,
}

impl StreamReplyInput {
    pub fn new(message: LiveMessage, author_id: impl Into<String>) -> Self {
        Self {
            message,
            author_id: author_id.into(),
        }
    }
}

/// Result of a finished session
#[derive(Debug, Clone)]
pub struct StreamReplyOutput {
    /// How fragment production ended
    pub outcome: StreamOutcome,
    /// The final render pushed to the live message
    pub final_text: String,
    /// Every phase the session passed through, ending in `Closed`
    pub phases: Vec<StreamPhase>,
    /// How the throttled renders settled
    pub updates: DrainReport,
    /// The live message handle after the final render
    pub message: LiveMessage,
}

/// Use case for rendering one streamed answer into a live message
pub struct StreamReplyUseCase {
    sink: Arc<dyn LiveMessageSink>,
    config: StreamConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl StreamReplyUseCase {
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

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Run one session to completion.
    ///
    /// `transcript` receives a new trailing assistant turn, which ends up
    /// holding the final render. `source` is released before returning,
    /// including when the configuration is rejected.
    ///
    /// If the returned future is dropped before completion (or the session
    /// panics), in-flight renders are aborted, no final render is pushed and
    /// the source is released on a background task.
    pub async fn execute(
        &self,
        input: StreamReplyInput,
        transcript: &mut Transcript,
        source: Box<dyn FragmentSource>,
    ) -> Result<StreamReplyOutput, StreamReplyError> {
        let mut source = SourceGuard::new(source);
        if let Err(e) = self.config.validate() {
            source.release().await;
            return Err(e.into());
        }

        info!(
            "Starting stream session for message {} in {}",
            input.message.message_id(),
            input.message.conversation_id()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "stream_started",
            serde_json::json!({
                "conversation_id": input.message.conversation_id(),
                "message_id": input.message.message_id(),
                "turns": transcript.len(),
            }),
        ));

        let target = RenderTarget::new(
            Arc::clone(&self.sink),
            input.message,
            &input.author_id,
            self.config.translate_markdown,
        );
        let mut scheduler = UpdateScheduler::new(self.config.max_in_flight_updates);
        let mut phases = PhaseTracker::new();

        transcript.append(Message::assistant(""));
        advance(&mut phases, StreamPhase::Streaming);

        let outcome = self
            .pull_fragments(transcript, &mut source, &target, &mut scheduler)
            .await;
        advance(&mut phases, outcome.phase());

        // Intermediate renders must all land before the final one.
        scheduler.drain().await;

        let final_text = target.render(transcript.last_content());
        if let Err(e) = transcript.mutate_last(final_text.clone()) {
            warn!("Could not freeze assistant turn: {}", e);
        }
        let final_push = target
            .push_rendered(final_text.clone(), "", transcript.snapshot())
            .await;

        let updates = scheduler.drain().await;
        source.release().await;
        advance(&mut phases, StreamPhase::Closed);

        info!(
            "Stream session closed: outcome={:?}, {} bytes, {}/{} updates failed",
            outcome,
            final_text.len(),
            updates.failed,
            updates.dispatched
        );
        let message = target.message();
        self.conversation_logger.log(ConversationEvent::new(
            "stream_finished",
            serde_json::json!({
                "conversation_id": message.conversation_id(),
                "message_id": message.message_id(),
                "outcome": outcome,
                "bytes": final_text.len(),
                "updates_dispatched": updates.dispatched,
                "updates_failed": updates.failed,
                "final_push_ok": final_push.is_ok(),
                "text": final_text,
            }),
        ));

        if let Err(e) = final_push {
            warn!("Final render failed: {}", e);
            return Err(StreamReplyError::FinalPushFailed(e));
        }

        Ok(StreamReplyOutput {
            outcome,
            final_text,
            phases: phases.history().to_vec(),
            updates,
            message,
        })
    }

    /// The pull loop. Returns how fragment production ended.
    async fn pull_fragments(
        &self,
        transcript: &mut Transcript,
        source: &mut SourceGuard,
        target: &RenderTarget,
        scheduler: &mut UpdateScheduler,
    ) -> StreamOutcome {
        let started = Instant::now();
        // A timeout past the clock's range means no deadline.
        let deadline = started.checked_add(self.config.timeout);
        let mut word_count = 0;

        loop {
            let next = source.next_fragment();
            let pulled = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, next).await {
                    Ok(pulled) => pulled,
                    Err(_) => {
                        warn!("Stream response timed out after {:?}", self.config.timeout);
                        return StreamOutcome::TimedOut;
                    }
                },
                None => next.await,
            };

            let fragment = match pulled {
                None => return StreamOutcome::Completed,
                Some(Err(e)) => {
                    warn!("Fragment source failed: {}", e);
                    return StreamOutcome::Failed(e.to_string());
                }
                Some(Ok(fragment)) => fragment,
            };

            if started.elapsed() > self.config.timeout {
                warn!("Stream response timed out after {:?}", self.config.timeout);
                return StreamOutcome::TimedOut;
            }

            if let Err(e) = transcript.extend_last(&fragment) {
                return StreamOutcome::Failed(e.to_string());
            }
            word_count += count_words(&fragment);

            if word_count >= self.config.flush_word_threshold {
                word_count = 0;
                let target = target.clone();
                let content = transcript.last_content().to_string();
                let snapshot = transcript.snapshot();
                let marker = self.config.working_marker.clone();
                scheduler
                    .dispatch(async move { target.push(&content, &marker, snapshot).await })
                    .await;
            }
        }
    }
}

async fn release_source(source: &mut dyn FragmentSource) {
    if let Err(e) = source.release().await {
        warn!("Failed to release fragment source: {}", e);
    }
}

/// Owns the session's fragment source until it is released.
///
/// A guard dropped while still holding the source releases it on a spawned
/// task, so cancelled and panicking sessions do not leak the stream.
struct SourceGuard {
    source: Option<Box<dyn FragmentSource>>,
}

impl SourceGuard {
    fn new(source: Box<dyn FragmentSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    async fn next_fragment(&mut self) -> Option<Result<String, SourceError>> {
        match self.source.as_mut() {
            Some(source) => source.next_fragment().await,
            None => None,
        }
    }

    /// Release once; later calls do nothing.
    async fn release(&mut self) {
        if let Some(mut source) = self.source.take() {
            release_source(source.as_mut()).await;
        }
    }
}

impl Drop for SourceGuard {
    fn drop(&mut self) {
        let Some(mut source) = self.source.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("Session ended early, releasing fragment source in background");
                handle.spawn(async move { release_source(source.as_mut()).await });
            }
            Err(_) => warn!("Fragment source dropped outside a runtime without release"),
        }
    }
}

fn advance(phases: &mut PhaseTracker, next: StreamPhase) {
    match phases.advance(next) {
        Ok(()) => debug!("Stream phase -> {}", next),
        Err(e) => warn!("{}", e),
    }
}
