//! Application-level configuration.
//!
//! - [`StreamConfig`]: deadline, flush threshold and rendering options for
//!   one streaming session

pub mod stream_config;

pub use stream_config::{ConfigError, StreamConfig};
