//! Prompt domain
//!
//! System prompt templates handed to the completion provider.

mod system;

pub use system::{BOT_USER_ID_PLACEHOLDER, DEFAULT_SYSTEM_TEXT, build_system_text};
