//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Transcript has no turns")]
    EmptyTranscript,

    #[error("Last turn is not an assistant turn")]
    LastTurnNotAssistant,

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_display() {
        let error = DomainError::InvalidTransition {
            from: "closed".to_string(),
            to: "streaming".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid phase transition: closed -> streaming"
        );
    }
}
