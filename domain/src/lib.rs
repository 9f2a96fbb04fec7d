//! Domain layer for live-reply
//!
//! This crate contains the core types and pure transforms behind rendering a
//! streaming assistant answer into a chat message that is edited in place.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Transcript**: the ordered turns of a conversation. A streaming session
//!   owns the trailing assistant turn while it runs.
//! - **Dialect**: chat-platform markup on one side, provider Markdown on the
//!   other. [`to_internal`] and [`to_external`] translate between them.
//! - **Live message**: the one chat message a session keeps overwriting,
//!   first with throttled partial renders and finally with the full answer.
//! - **Stream phase**: `Idle → Streaming → {Finalizing, TimedOut, Failed} → Closed`.

pub mod core;
pub mod dialect;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::{error::DomainError, model::ModelSelector};
pub use dialect::{chat_to_provider, provider_to_chat, to_external, to_internal};
pub use prompt::{DEFAULT_SYSTEM_TEXT, build_system_text};
pub use session::{
    entities::{Message, Role},
    live_message::LiveMessage,
    phase::{PhaseTracker, StreamOutcome, StreamPhase},
    transcript::Transcript,
};
