//! Fragment source port
//!
//! A lazy, finite sequence of text fragments produced by a completion
//! provider. Fragments carry no identity beyond their order.

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use thiserror::Error;

/// Errors raised by a fragment source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Stream interrupted: {0}")]
    Interrupted(String),

    #[error("Release failed: {0}")]
    Release(String),
}

/// Ordered fragments of an assistant answer.
///
/// `next_fragment` returns `None` once the sequence is exhausted and
/// `Some(Err(_))` when the upstream fails mid-sequence. `release` frees the
/// underlying resource; the caller invokes it exactly once per session.
#[async_trait]
pub trait FragmentSource: Send {
    async fn next_fragment(&mut self) -> Option<Result<String, SourceError>>;

    async fn release(&mut self) -> Result<(), SourceError>;
}

/// Adapter over any boxed [`futures::Stream`] of fragment results.
///
/// Releasing drops the inner stream; pulls after release yield `None`.
pub struct StreamFragmentSource {
    inner: Option<BoxStream<'static, Result<String, SourceError>>>,
}

impl StreamFragmentSource {
    pub fn new(stream: BoxStream<'static, Result<String, SourceError>>) -> Self {
        Self {
            inner: Some(stream),
        }
    }
}

#[async_trait]
impl FragmentSource for StreamFragmentSource {
    async fn next_fragment(&mut self) -> Option<Result<String, SourceError>> {
        match self.inner.as_mut() {
            Some(stream) => stream.next().await,
            None => None,
        }
    }

    async fn release(&mut self) -> Result<(), SourceError> {
        self.inner = None;
        Ok(())
    }
}

/// Source that yields one descriptive error fragment and ends.
///
/// Stands in for a provider that could not be invoked, so the aggregator
/// renders the error text like any other answer.
pub struct ErrorFragmentSource {
    message: Option<String>,
}

impl ErrorFragmentSource {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

#[async_trait]
impl FragmentSource for ErrorFragmentSource {
    async fn next_fragment(&mut self) -> Option<Result<String, SourceError>> {
        self.message.take().map(Ok)
    }

    async fn release(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn stream_source_yields_in_order_then_ends() {
        let fragments = vec![Ok("a ".to_string()), Ok("b".to_string())];
        let mut source = StreamFragmentSource::new(stream::iter(fragments).boxed());

        assert_eq!(source.next_fragment().await, Some(Ok("a ".to_string())));
        assert_eq!(source.next_fragment().await, Some(Ok("b".to_string())));
        assert_eq!(source.next_fragment().await, None);
    }

    #[tokio::test]
    async fn stream_source_is_empty_after_release() {
        let fragments = vec![Ok("a".to_string())];
        let mut source = StreamFragmentSource::new(stream::iter(fragments).boxed());
        source.release().await.unwrap();
        assert_eq!(source.next_fragment().await, None);
    }

    #[tokio::test]
    async fn error_source_yields_single_fragment() {
        let mut source = ErrorFragmentSource::new("An error occurred");
        assert_eq!(
            source.next_fragment().await,
            Some(Ok("An error occurred".to_string()))
        );
        assert_eq!(source.next_fragment().await, None);
    }
}
