//! Transcript store.
//!
//! The ordered exchange history a streaming session aggregates into. Only the
//! session that appended the trailing assistant turn writes to it, so no
//! locking is involved; background renders get a [`Transcript::snapshot`].

use super::entities::{Message, Role};
use crate::core::error::DomainError;
use crate::dialect::to_internal;

/// Ordered sequence of conversation turns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transcript with a system turn
    pub fn with_system(content: impl Into<String>) -> Self {
        Self {
            turns: vec![Message::system(content)],
        }
    }

    pub fn from_turns(turns: Vec<Message>) -> Self {
        Self { turns }
    }

    pub fn append(&mut self, turn: Message) {
        self.turns.push(turn);
    }

    /// Append a user turn received from the chat platform.
    ///
    /// The raw platform text is converted with [`to_internal`] first.
    pub fn push_user(&mut self, raw_text: &str, translate_markdown: bool) {
        let content = to_internal(Some(raw_text), translate_markdown).unwrap_or_default();
        self.append(Message::user(content));
    }

    /// Replace the content of the trailing assistant turn
    pub fn mutate_last(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        let last = self.last_assistant_mut()?;
        last.content = content.into();
        Ok(())
    }

    /// Append text to the trailing assistant turn
    pub fn extend_last(&mut self, fragment: &str) -> Result<(), DomainError> {
        let last = self.last_assistant_mut()?;
        last.content.push_str(fragment);
        Ok(())
    }

    pub fn last(&self) -> Option<&Message> {
        self.turns.last()
    }

    /// Content of the trailing turn, or `""` for an empty transcript
    pub fn last_content(&self) -> &str {
        self.turns.last().map(|m| m.content.as_str()).unwrap_or("")
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    /// Owned copy of every turn, handed to work that outlives the borrow
    pub fn snapshot(&self) -> Vec<Message> {
        self.turns.clone()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    fn last_assistant_mut(&mut self) -> Result<&mut Message, DomainError> {
        let last = self.turns.last_mut().ok_or(DomainError::EmptyTranscript)?;
        if last.role != Role::Assistant {
            return Err(DomainError::LastTurnNotAssistant);
        }
        Ok(last)
    }
}
