//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod completion_provider;
pub mod conversation_logger;
pub mod fragment_source;
pub mod message_sink;
