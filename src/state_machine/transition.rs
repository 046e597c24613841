//! Pure state transition function
//!
//! Given the same state, context and event, `transition` always returns the
//! same result and performs no I/O. The runtime executes the returned effects.

use super::reveal::Reveal;
use super::{Effect, Event, SessionContext, SessionState, Timer};
use crate::transcript::Turn;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
///
/// The first two are dropped submissions; the runtime ignores them silently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Reply pending, submission dropped")]
    ReplyPending,
    #[error("Blank submission dropped")]
    BlankInput,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl TransitionError {
    pub fn is_dropped_submission(&self) -> bool {
        matches!(self, Self::ReplyPending | Self::BlankInput)
    }
}

/// Initial state and effects for a fresh session
pub fn boot(context: &SessionContext) -> TransitionResult {
    TransitionResult::new(SessionState::Starting)
        .with_effect(Effect::schedule(Timer::Welcome, context.timing.welcome_delay))
}

/// Pure transition function
pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Welcome
        // ============================================================

        // Starting + WelcomeDue -> Revealing (welcome text)
        (SessionState::Starting, Event::WelcomeDue { at }) => Ok(begin_reveal(
            context,
            context.script.welcome.clone(),
            None,
            at,
        )),

        // ============================================================
        // Visitor submissions
        // ============================================================

        // Idle + UserSubmit -> Thinking
        (SessionState::Idle, Event::UserSubmit { text, at }) => {
            let prompt = text.trim();
            if prompt.is_empty() {
                return Err(TransitionError::BlankInput);
            }

            Ok(TransitionResult::new(SessionState::Thinking {
                prompt: prompt.to_string(),
            })
            .with_effect(Effect::append_turn(Turn::user(prompt, at)))
            .with_effect(Effect::notify_pending(true))
            .with_effect(Effect::schedule(
                Timer::Thinking,
                context.timing.thinking_delay,
            )))
        }

        // Any pending state + UserSubmit -> dropped
        (
            SessionState::Starting | SessionState::Thinking { .. } | SessionState::Revealing { .. },
            Event::UserSubmit { .. },
        ) => Err(TransitionError::ReplyPending),

        // ============================================================
        // Reply resolution
        // ============================================================

        // Thinking + ThinkingElapsed -> Revealing (matched response)
        (SessionState::Thinking { prompt }, Event::ThinkingElapsed { at }) => {
            let rules = &context.script.rules;
            let rule = rules.match_index(prompt);
            let reply = rules.rules()[rule].response().to_string();
            Ok(begin_reveal(context, reply, Some(rule), at))
        }

        // ============================================================
        // Progressive reveal
        // ============================================================

        (SessionState::Revealing { reveal, started_at }, Event::RevealTick) => {
            let mut reveal = reveal.clone();
            match reveal.advance() {
                // More to show -> Revealing
                Some(step) => {
                    let partial_text = reveal.partial().to_string();
                    Ok(TransitionResult::new(SessionState::Revealing {
                        reveal,
                        started_at: *started_at,
                    })
                    .with_effect(Effect::NotifyRevealStep { step, partial_text }))
                }
                // Everything shown -> Idle with the complete literal text
                None => Ok(TransitionResult::new(SessionState::Idle)
                    .with_effect(Effect::StopRevealTicker)
                    .with_effect(Effect::append_turn(Turn::bot(
                        reveal.into_text(),
                        *started_at,
                    )))
                    .with_effect(Effect::notify_pending(false))),
            }
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {} with event {:?}",
            state.name(),
            event
        ))),
    }
}

fn begin_reveal(
    context: &SessionContext,
    text: String,
    rule: Option<usize>,
    at: DateTime<Utc>,
) -> TransitionResult {
    TransitionResult::new(SessionState::Revealing {
        reveal: Reveal::new(text),
        started_at: at,
    })
    .with_effect(Effect::NotifyRevealStarted {
        started_at: at,
        rule,
    })
    .with_effect(Effect::StartRevealTicker {
        interval: context.timing.reveal_interval,
    })
}
