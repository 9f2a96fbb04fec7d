//! Fragment source fed through a tokio channel.
//!
//! Lets a producer task (an HTTP stream reader, a test harness) hand
//! fragments to the aggregator without implementing the port itself.

use async_trait::async_trait;
use reply_application::{FragmentSource, SourceError};
use tokio::sync::mpsc;

pub type FragmentSender = mpsc::Sender<Result<String, SourceError>>;

/// Receiving half of a fragment channel
pub struct ChannelFragmentSource {
    rx: mpsc::Receiver<Result<String, SourceError>>,
    released: bool,
}

impl ChannelFragmentSource {
    /// Create a bounded channel and the source reading from it.
    pub fn channel(capacity: usize) -> (FragmentSender, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            tx,
            Self {
                rx,
                released: false,
            },
        )
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

#[async_trait]
impl FragmentSource for ChannelFragmentSource {
    async fn next_fragment(&mut self) -> Option<Result<String, SourceError>> {
        if self.released {
            return None;
        }
        self.rx.recv().await
    }

    /// Close the channel; pending sends fail and the producer sees it.
    async fn release(&mut self) -> Result<(), SourceError> {
        self.rx.close();
        self.released = true;
        Ok(())
    }
}
