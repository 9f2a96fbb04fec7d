//! Completion provider invocation.

use crate::ports::completion_provider::CompletionProvider;
use crate::ports::fragment_source::{ErrorFragmentSource, FragmentSource};
use reply_domain::{Message, ModelSelector};
use tracing::{info, warn};

/// Start a streamed completion, turning an invocation failure into a
/// one-fragment source carrying the error text.
///
/// The aggregator then renders the error like any answer, so callers have a
/// single control flow whether or not the provider could be reached.
pub async fn invoke_completion(
    provider: &dyn CompletionProvider,
    transcript: &[Message],
    model: &ModelSelector,
) -> Box<dyn FragmentSource> {
    info!("Requesting completion from {} ({} turns)", model, transcript.len());
    match provider.stream(transcript, model).await {
        Ok(source) => source,
        Err(e) => {
            warn!("Completion provider invocation failed: {}", e);
            Box::new(ErrorFragmentSource::new(format!(
                "An error occurred: {}. Please check the completion provider settings.",
                e
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion_provider::ProviderError;
    use crate::ports::fragment_source::{SourceError, StreamFragmentSource};
    use async_trait::async_trait;
    use futures::StreamExt;
    use futures::stream;

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn stream(
            &self,
            _transcript: &[Message],
            _model: &ModelSelector,
        ) -> Result<Box<dyn FragmentSource>, ProviderError> {
            Err(ProviderError::ConnectionError("refused".to_string()))
        }
    }

    struct EchoProvider;

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        async fn stream(
            &self,
            transcript: &[Message],
            _model: &ModelSelector,
        ) -> Result<Box<dyn FragmentSource>, ProviderError> {
            let last = transcript
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            let fragments: Vec<Result<String, SourceError>> = vec![Ok(last)];
            Ok(Box::new(StreamFragmentSource::new(
                stream::iter(fragments).boxed(),
            )))
        }
    }

    #[tokio::test]
    async fn failure_becomes_single_error_fragment() {
        let mut source =
            invoke_completion(&FailingProvider, &[], &ModelSelector::default()).await;
        let fragment = source.next_fragment().await.unwrap().unwrap();
        assert_eq!(
            fragment,
            "An error occurred: Connection error: refused. Please check the completion provider settings."
        );
        assert!(source.next_fragment().await.is_none());
    }

    #[tokio::test]
    async fn success_passes_source_through() {
        let transcript = vec![Message::user("ping")];
        let mut source =
            invoke_completion(&EchoProvider, &transcript, &ModelSelector::new("echo")).await;
        assert_eq!(source.next_fragment().await, Some(Ok("ping".to_string())));
        assert_eq!(source.next_fragment().await, None);
    }
}
