//! Presentation layer for live-reply
//!
//! This crate contains CLI definitions and the terminal rendering of a
//! live message.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::Cli;
pub use output::ConsoleMessageSink;
