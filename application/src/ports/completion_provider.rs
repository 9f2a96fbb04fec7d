//! Completion provider port
//!
//! Defines how the application asks a provider for a streamed answer.
//! Transport and provider selection live behind this trait.

use super::fragment_source::FragmentSource;
use async_trait::async_trait;
use reply_domain::{Message, ModelSelector};
use thiserror::Error;

/// Errors that can occur when invoking a completion provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// A provider that turns a transcript into a stream of answer fragments
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Start a streamed completion for `transcript` with the selected model
    async fn stream(
        &self,
        transcript: &[Message],
        model: &ModelSelector,
    ) -> Result<Box<dyn FragmentSource>, ProviderError>;
}
