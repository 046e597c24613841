//! Session runtime executor

use super::scheduler::Scheduler;
use super::traits::TranscriptStore;
use super::SessionEvent;

use crate::state_machine::{boot, transition, Effect, Event, SessionContext, SessionState};
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Runs one session: the only owner of its state, fed by a single event channel
pub struct SessionRuntime<S>
where
    S: TranscriptStore + 'static,
{
    context: SessionContext,
    state: SessionState,
    store: S,
    scheduler: Scheduler,
    event_rx: mpsc::Receiver<Event>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
    /// Mirror of `state.is_pending()` for readers outside the runtime
    pending_tx: watch::Sender<bool>,
    shutdown: CancellationToken,
}

impl<S> SessionRuntime<S>
where
    S: TranscriptStore + 'static,
{
    pub fn new(
        context: SessionContext,
        store: S,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
        broadcast_tx: broadcast::Sender<SessionEvent>,
        pending_tx: watch::Sender<bool>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            context,
            state: SessionState::default(),
            store,
            scheduler: Scheduler::new(event_tx),
            event_rx,
            broadcast_tx,
            pending_tx,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        let session_id = self.context.session_id.clone();
        tracing::info!(session_id = %session_id, "Starting session runtime");

        let boot = boot(&self.context);
        self.state = boot.new_state;
        self.pending_tx.send_replace(self.state.is_pending());
        self.execute_effects(boot.effects).await;

        // Process events in a loop until the session is closed
        loop {
            tokio::select! {
                () = self.shutdown.cancelled() => break,
                Some(event) = self.event_rx.recv() => {
                    self.process_event(event).await;
                }
            }
        }

        self.scheduler.stop_ticker();
        tracing::info!(session_id = %session_id, "Session runtime stopped");
    }

    async fn process_event(&mut self, event: Event) {
        // Pure state transition
        let result = match transition(&self.state, &self.context, event) {
            Ok(r) => r,
            Err(e) if e.is_dropped_submission() => {
                tracing::debug!(
                    session_id = %self.context.session_id,
                    state = self.state.name(),
                    reason = %e,
                    "Submission ignored"
                );
                return;
            }
            Err(e) => {
                // Timer events that lost a race with a state change
                tracing::debug!(session_id = %self.context.session_id, error = %e, "Ignoring event");
                return;
            }
        };

        let old_state = std::mem::replace(&mut self.state, result.new_state);
        if old_state.name() != self.state.name() {
            tracing::debug!(
                session_id = %self.context.session_id,
                from = old_state.name(),
                to = self.state.name(),
                "State transition"
            );
        }

        self.execute_effects(result.effects).await;
    }

    /// Execute effects in order; a failing effect does not stop the rest
    async fn execute_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            if let Err(e) = self.execute_effect(effect).await {
                tracing::error!(session_id = %self.context.session_id, error = %e, "Effect failed");
                let _ = self.broadcast_tx.send(SessionEvent::Error { message: e });
            }
        }
    }

    async fn execute_effect(&mut self, effect: Effect) -> Result<(), String> {
        match effect {
            Effect::AppendTurn { turn } => {
                let index = self.store.append(turn.clone()).await?;
                tracing::debug!(
                    session_id = %self.context.session_id,
                    index,
                    speaker = ?turn.speaker,
                    "Turn appended"
                );
                let _ = self.broadcast_tx.send(SessionEvent::Turn { index, turn });
                Ok(())
            }

            Effect::ScheduleTimer { timer, delay } => {
                self.scheduler.schedule_once(timer, delay);
                Ok(())
            }

            Effect::StartRevealTicker { interval } => {
                self.scheduler.start_ticker(interval);
                Ok(())
            }

            Effect::StopRevealTicker => {
                self.scheduler.stop_ticker();
                Ok(())
            }

            Effect::NotifyRevealStarted { started_at, rule } => {
                tracing::info!(
                    session_id = %self.context.session_id,
                    rule = ?rule,
                    "Reply reveal started"
                );
                let _ = self
                    .broadcast_tx
                    .send(SessionEvent::RevealStarted { started_at });
                Ok(())
            }

            Effect::NotifyRevealStep { step, partial_text } => {
                let _ = self
                    .broadcast_tx
                    .send(SessionEvent::Reveal { step, partial_text });
                Ok(())
            }

            Effect::NotifyPending { pending } => {
                self.pending_tx.send_replace(pending);
                let _ = self.broadcast_tx.send(SessionEvent::StateChange { pending });
                Ok(())
            }
        }
    }
}
