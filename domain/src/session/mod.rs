//! Streaming session domain.
//!
//! - [`entities::Message`]: a single turn within a conversation
//! - [`transcript::Transcript`]: the ordered turns a session aggregates into
//! - [`live_message::LiveMessage`]: the chat message edited in place
//! - [`phase::StreamPhase`]: lifecycle of one streaming response

pub mod entities;
pub mod live_message;
pub mod phase;
pub mod transcript;
