//! Session state types

use super::reveal::Reveal;
use crate::matcher::Script;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Session state
///
/// Every state except `Idle` counts as "reply pending": submissions are
/// dropped until the current bot turn has been fully revealed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for the startup delay before the welcome turn
    #[default]
    Starting,

    /// Ready for visitor input
    Idle,

    /// Visitor turn recorded, waiting out the thinking delay
    Thinking { prompt: String },

    /// Bot reply being revealed one character per tick
    Revealing {
        reveal: Reveal,
        /// When the reply was resolved; becomes the bot turn's timestamp
        started_at: DateTime<Utc>,
    },
}

impl SessionState {
    pub fn is_pending(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Starting => "starting",
            SessionState::Idle => "idle",
            SessionState::Thinking { .. } => "thinking",
            SessionState::Revealing { .. } => "revealing",
        }
    }
}

/// Fixed delays driving the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Startup delay before the welcome turn
    pub welcome_delay: Duration,
    /// Pause between a visitor turn and the start of the reply
    pub thinking_delay: Duration,
    /// Time between revealed characters
    pub reveal_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            welcome_delay: Duration::from_millis(1000),
            thinking_delay: Duration::from_millis(500),
            reveal_interval: Duration::from_millis(30),
        }
    }
}

/// Context for a session (immutable configuration)
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub script: Arc<Script>,
    pub timing: Timing,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>, script: Arc<Script>, timing: Timing) -> Self {
        Self {
            session_id: session_id.into(),
            script,
            timing,
        }
    }
}
