//! Offline completion provider.
//!
//! Streams a prepared answer (or echoes the latest user turn) word by word
//! with a fixed pause between fragments, standing in for a live model.

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use reply_application::{
    CompletionProvider, FragmentSource, ProviderError, SourceError, StreamFragmentSource,
};
use reply_domain::{Message, ModelSelector, Role};
use std::time::Duration;
use tracing::debug;

/// Completion provider that replays text instead of calling a model
pub struct ReplayProvider {
    answer: Option<String>,
    delay: Duration,
}

impl ReplayProvider {
    /// Echo the most recent user turn.
    pub fn echo() -> Self {
        Self {
            answer: None,
            delay: Duration::ZERO,
        }
    }

    /// Replay `answer` regardless of the transcript.
    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            delay: Duration::ZERO,
        }
    }

    /// Pause before each fragment.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn answer_for(&self, transcript: &[Message]) -> Result<String, ProviderError> {
        if let Some(answer) = &self.answer {
            return Ok(answer.clone());
        }
        transcript
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .ok_or_else(|| ProviderError::RequestFailed("no user turn to echo".to_string()))
    }
}

#[async_trait]
impl CompletionProvider for ReplayProvider {
    async fn stream(
        &self,
        transcript: &[Message],
        model: &ModelSelector,
    ) -> Result<Box<dyn FragmentSource>, ProviderError> {
        let fragments = split_fragments(&self.answer_for(transcript)?);
        debug!("Replaying {} fragments as {}", fragments.len(), model);

        let delay = self.delay;
        let stream = stream::iter(fragments)
            .then(move |fragment| async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok::<_, SourceError>(fragment)
            })
            .boxed();
        Ok(Box::new(StreamFragmentSource::new(stream)))
    }
}

/// Split text into word fragments, each keeping its trailing whitespace.
///
/// Concatenating the fragments reproduces the input exactly.
pub fn split_fragments(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut in_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            in_space = true;
        } else if in_space {
            fragments.push(std::mem::take(&mut current));
            in_space = false;
        }
        current.push(ch);
    }
    if !current.is_empty() {
        fragments.push(current);
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(mut source: Box<dyn FragmentSource>) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(fragment) = source.next_fragment().await {
            out.push(fragment.unwrap());
        }
        source.release().await.unwrap();
        out
    }

    #[test]
    fn test_split_fragments_preserves_text() {
        let text = "  Hello there,\n\nfriend.  ";
        let fragments = split_fragments(text);
        assert_eq!(fragments, vec!["  ", "Hello ", "there,\n\n", "friend.  "]);
        assert_eq!(fragments.concat(), text);
    }

    #[test]
    fn test_split_fragments_empty() {
        assert!(split_fragments("").is_empty());
    }

    #[tokio::test]
    async fn replays_prepared_answer() {
        let provider = ReplayProvider::with_answer("one two three");
        let source = provider
            .stream(&[Message::user("ignored")], &ModelSelector::default())
            .await
            .unwrap();
        assert_eq!(collect(source).await, vec!["one ", "two ", "three"]);
    }

    #[tokio::test]
    async fn echoes_latest_user_turn() {
        let provider = ReplayProvider::echo();
        let transcript = vec![
            Message::system("sys"),
            Message::user("first"),
            Message::assistant("reply"),
            Message::user("second question"),
        ];
        let source = provider
            .stream(&transcript, &ModelSelector::default())
            .await
            .unwrap();
        assert_eq!(collect(source).await.concat(), "second question");
    }

    #[tokio::test]
    async fn echo_without_user_turn_fails() {
        let provider = ReplayProvider::echo();
        let result = provider
            .stream(&[Message::system("sys")], &ModelSelector::default())
            .await;
        assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_spaces_out_fragments() {
        let provider =
            ReplayProvider::with_answer("a b c").with_delay(Duration::from_millis(100));
        let started = tokio::time::Instant::now();
        let source = provider
            .stream(&[], &ModelSelector::default())
            .await
            .unwrap();
        assert_eq!(collect(source).await.len(), 3);
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
