//! Conversation turns and the in-memory transcript
//!
//! Transcripts live exactly as long as their session. Nothing is written to
//! disk, so a restart starts over with an empty transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Display name for visitor turns
pub const USER_DISPLAY_NAME: &str = "You";

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Bot,
}

/// One message in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            timestamp,
        }
    }

    pub fn bot(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
            timestamp,
        }
    }
}

/// Append-only turn list
#[derive(Debug, Default)]
pub struct InMemoryTranscript {
    turns: RwLock<Vec<Turn>>,
}

impl InMemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, returning its position
    pub async fn push(&self, turn: Turn) -> usize {
        let mut turns = self.turns.write().await;
        turns.push(turn);
        turns.len() - 1
    }

    /// Copy of all turns in order
    pub async fn snapshot(&self) -> Vec<Turn> {
        self.turns.read().await.clone()
    }
}
