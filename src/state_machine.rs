//! Conversation session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
mod reveal;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, Timer};
pub use event::Event;
pub use reveal::RevealStep;
pub use state::{SessionContext, SessionState, Timing};
pub use transition::{boot, transition};
