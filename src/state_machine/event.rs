//! Events that can occur in a session

use chrono::{DateTime, Utc};

/// Events that trigger state transitions
///
/// Timestamps are taken by whoever raises the event, which keeps
/// `transition` free of clock reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Visitor events
    UserSubmit { text: String, at: DateTime<Utc> },

    // Timer events
    WelcomeDue { at: DateTime<Utc> },
    ThinkingElapsed { at: DateTime<Utc> },
    RevealTick,
}
