//! Stream session lifecycle.
//!
//! ```text
//! Idle ──▶ Streaming ──▶ Finalizing ──▶ Closed
//!              │
//!              ├──▶ TimedOut ──▶ Closed
//!              └──▶ Failed   ──▶ Closed
//! ```
//!
//! Every terminal path ends in `Closed`; `Idle` may close directly when the
//! session never starts pulling.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of a streaming session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamPhase {
    Idle,
    Streaming,
    Finalizing,
    TimedOut,
    Failed,
    Closed,
}

impl StreamPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamPhase::Idle => "idle",
            StreamPhase::Streaming => "streaming",
            StreamPhase::Finalizing => "finalizing",
            StreamPhase::TimedOut => "timed_out",
            StreamPhase::Failed => "failed",
            StreamPhase::Closed => "closed",
        }
    }

    pub fn can_transition_to(&self, next: StreamPhase) -> bool {
        use StreamPhase::*;
        matches!(
            (self, next),
            (Idle, Streaming)
                | (Idle, Closed)
                | (Streaming, Finalizing)
                | (Streaming, TimedOut)
                | (Streaming, Failed)
                | (Finalizing, Closed)
                | (TimedOut, Closed)
                | (Failed, Closed)
        )
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, StreamPhase::Closed)
    }
}

impl std::fmt::Display for StreamPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase tracker that records the path a session took
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    history: Vec<StreamPhase>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self {
            history: vec![StreamPhase::Idle],
        }
    }

    pub fn current(&self) -> StreamPhase {
        self.history
            .last()
            .copied()
            .unwrap_or(StreamPhase::Idle)
    }

    pub fn advance(&mut self, next: StreamPhase) -> Result<(), DomainError> {
        let current = self.current();
        if !current.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: current.to_string(),
                to: next.to_string(),
            });
        }
        self.history.push(next);
        Ok(())
    }

    pub fn history(&self) -> &[StreamPhase] {
        &self.history
    }

    pub fn passed_through(&self, phase: StreamPhase) -> bool {
        self.history.contains(&phase)
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// How fragment production ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum StreamOutcome {
    /// The source was exhausted
    Completed,
    /// The deadline passed before the source was exhausted
    TimedOut,
    /// The source raised mid-sequence
    Failed(String),
}

impl StreamOutcome {
    /// The phase entered from `Streaming` for this outcome
    pub fn phase(&self) -> StreamPhase {
        match self {
            StreamOutcome::Completed => StreamPhase::Finalizing,
            StreamOutcome::TimedOut => StreamPhase::TimedOut,
            StreamOutcome::Failed(_) => StreamPhase::Failed,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StreamOutcome::Completed)
    }
}
