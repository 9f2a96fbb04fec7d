//! Terminal rendering of live messages

mod console;

pub use console::ConsoleMessageSink;
