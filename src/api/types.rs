//! API request and response types

use crate::transcript::{Speaker, Turn, USER_DISPLAY_NAME};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to send visitor text
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for chat action
///
/// Always `queued: true`; whether the text became a turn shows up on the stream.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub queued: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub bot_name: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub turns: Vec<TurnView>,
    pub pending: bool,
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// A turn as rendered by the page
#[derive(Debug, Clone, Serialize)]
pub struct TurnView {
    pub index: usize,
    pub speaker: Speaker,
    pub name: String,
    pub text: String,
    /// UTC instant; the page renders it in the visitor's local time
    pub timestamp: DateTime<Utc>,
}

impl TurnView {
    pub fn new(index: usize, turn: &Turn, bot_name: &str) -> Self {
        let name = match turn.speaker {
            Speaker::User => USER_DISPLAY_NAME,
            Speaker::Bot => bot_name,
        };
        Self {
            index,
            speaker: turn.speaker,
            name: name.to_string(),
            text: turn.text.clone(),
            timestamp: turn.timestamp,
        }
    }

    pub fn list(turns: &[Turn], bot_name: &str) -> Vec<Self> {
        turns
            .iter()
            .enumerate()
            .map(|(index, turn)| Self::new(index, turn, bot_name))
            .collect()
    }
}
