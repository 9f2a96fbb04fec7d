//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod invoke;
pub(crate) mod render;
pub mod stream_reply;
pub mod update_scheduler;
pub mod write_answer;
