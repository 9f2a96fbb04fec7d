//! Slack Web API adapter.

pub mod error;
mod sink;

pub use error::SlackError;
pub use sink::{SLACK_MAX_MESSAGE_LEN, SlackMessageSink};
