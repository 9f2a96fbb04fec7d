//! Command line definitions

mod commands;

pub use commands::Cli;
