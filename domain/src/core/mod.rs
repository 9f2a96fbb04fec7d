//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelSelector`]: which completion model answers a session
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
