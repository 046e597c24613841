//! HTTP API for the homepage chat
//!
//! One session per page load. The page creates a session, follows it over
//! SSE and posts visitor text to it.

mod assets;
mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::runtime::SessionManager;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    /// Display name attached to bot turns
    pub bot_name: Arc<str>,
}

impl AppState {
    pub fn new(sessions: Arc<SessionManager>, bot_name: &str) -> Self {
        Self {
            sessions,
            bot_name: Arc::from(bot_name),
        }
    }
}
