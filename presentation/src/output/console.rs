//! Terminal stand-in for a chat message that is edited in place

use async_trait::async_trait;
use colored::Colorize;
use reply_application::{LiveMessageSink, MessageUpdate, SinkError};
use std::io::Write;
use std::sync::Mutex;

struct Screen {
    out: Box<dyn Write + Send>,
    /// Lines occupied by the last frame drawn
    drawn_lines: usize,
}

/// Draws each render over the previous one.
///
/// Renders that still carry the working marker are shown with the marker
/// dimmed. In quiet mode only unmarked renders (the final one) are printed.
pub struct ConsoleMessageSink {
    screen: Mutex<Screen>,
    working_marker: String,
    quiet: bool,
}

impl ConsoleMessageSink {
    pub fn new(working_marker: impl Into<String>) -> Self {
        Self::with_writer(working_marker, Box::new(std::io::stdout()))
    }

    pub fn with_writer(working_marker: impl Into<String>, out: Box<dyn Write + Send>) -> Self {
        Self {
            screen: Mutex::new(Screen {
                out,
                drawn_lines: 0,
            }),
            working_marker: working_marker.into(),
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Format one render for display
    pub fn frame(&self, text: &str) -> String {
        match self.split_marker(text) {
            Some(body) => format!("{}{}", body, self.working_marker.dimmed()),
            None => text.to_string(),
        }
    }

    fn split_marker<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.working_marker.is_empty() {
            return None;
        }
        text.strip_suffix(self.working_marker.as_str())
    }
}

#[async_trait]
impl LiveMessageSink for ConsoleMessageSink {
    async fn push(&self, update: &MessageUpdate) -> Result<(), SinkError> {
        let working = self.split_marker(&update.text).is_some();
        if self.quiet && working {
            return Ok(());
        }

        let frame = self.frame(&update.text);
        let mut screen = self
            .screen
            .lock()
            .map_err(|_| SinkError::Transport("console lock poisoned".to_string()))?;

        let mut buf = String::new();
        if !self.quiet && screen.drawn_lines > 0 {
            // Cursor up to the start of the previous frame, clear to end
            buf.push_str(&format!("\x1b[{}F\x1b[J", screen.drawn_lines));
        }
        buf.push_str(&frame);
        buf.push('\n');

        screen
            .out
            .write_all(buf.as_bytes())
            .and_then(|_| screen.out.flush())
            .map_err(|e| SinkError::Transport(e.to_string()))?;
        screen.drawn_lines = frame.lines().count().max(1);
        Ok(())
    }
}
