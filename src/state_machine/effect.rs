//! Effects produced by state transitions

use super::event::Event;
use super::reveal::RevealStep;
use crate::transcript::Turn;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Named one-shot timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Startup delay before the welcome turn
    Welcome,
    /// Pause between a visitor turn and the reply
    Thinking,
}

impl Timer {
    /// The event raised when this timer fires
    pub fn fired(self, at: DateTime<Utc>) -> Event {
        match self {
            Timer::Welcome => Event::WelcomeDue { at },
            Timer::Thinking => Event::ThinkingElapsed { at },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Timer::Welcome => "welcome",
            Timer::Thinking => "thinking",
        }
    }
}

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the transcript and announce it
    AppendTurn { turn: Turn },

    /// Arm a one-shot timer
    ScheduleTimer { timer: Timer, delay: Duration },

    /// Start the periodic reveal ticker
    StartRevealTicker { interval: Duration },

    /// Stop the reveal ticker
    StopRevealTicker,

    /// A bot reply began revealing; `rule` is the matched rule, `None` for the welcome
    NotifyRevealStarted {
        started_at: DateTime<Utc>,
        rule: Option<usize>,
    },

    /// One more character of the reply is visible
    NotifyRevealStep {
        step: RevealStep,
        partial_text: String,
    },

    /// The pending-reply flag changed
    NotifyPending { pending: bool },
}

impl Effect {
    pub fn append_turn(turn: Turn) -> Self {
        Effect::AppendTurn { turn }
    }

    pub fn schedule(timer: Timer, delay: Duration) -> Self {
        Effect::ScheduleTimer { timer, delay }
    }

    pub fn notify_pending(pending: bool) -> Self {
        Effect::NotifyPending { pending }
    }
}
