//! Server-Sent Events support

use super::types::TurnView;
use crate::runtime::SessionEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Convert broadcast stream to SSE stream
pub fn sse_stream(
    init_event: SessionEvent,
    broadcast_rx: tokio::sync::broadcast::Receiver<SessionEvent>,
    bot_name: Arc<str>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init_name = Arc::clone(&bot_name);
    let init =
        futures::stream::once(async move { Ok(session_event_to_axum(init_event, &init_name)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(move |result| match result {
        Ok(event) => Some(Ok(session_event_to_axum(event, &bot_name))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(init.chain(broadcasts)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn session_event_to_axum(event: SessionEvent, bot_name: &str) -> Event {
    let (event_type, data) = event_payload(event, bot_name);
    Event::default().event(event_type).data(data.to_string())
}

fn event_payload(event: SessionEvent, bot_name: &str) -> (&'static str, Value) {
    match event {
        SessionEvent::Init { turns, pending } => (
            "init",
            json!({
                "type": "init",
                "bot_name": bot_name,
                "turns": TurnView::list(&turns, bot_name),
                "pending": pending
            }),
        ),
        SessionEvent::Turn { index, turn } => (
            "turn",
            json!({
                "type": "turn",
                "turn": TurnView::new(index, &turn, bot_name)
            }),
        ),
        SessionEvent::RevealStarted { started_at } => (
            "reveal_started",
            json!({
                "type": "reveal_started",
                "name": bot_name,
                "timestamp": started_at
            }),
        ),
        SessionEvent::Reveal { step, partial_text } => (
            "reveal",
            json!({
                "type": "reveal",
                "step": step,
                "partial_text": partial_text
            }),
        ),
        SessionEvent::StateChange { pending } => (
            "state_change",
            json!({
                "type": "state_change",
                "pending": pending
            }),
        ),
        SessionEvent::Error { message } => (
            "error",
            json!({
                "type": "error",
                "message": message
            }),
        ),
    }
}
