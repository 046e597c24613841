//! Named timers feeding events back into a session
//!
//! Timer tasks only send events into the session channel. The session's
//! runtime stays the only code that touches state.

use crate::state_machine::{Event, Timer};
use chrono::Utc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Timers for one session
pub struct Scheduler {
    event_tx: mpsc::Sender<Event>,
    /// Parent of every timer token; cancelled when the scheduler drops
    root: CancellationToken,
    /// Token of the running reveal ticker, if any
    ticker: Option<CancellationToken>,
}

impl Scheduler {
    pub fn new(event_tx: mpsc::Sender<Event>) -> Self {
        Self {
            event_tx,
            root: CancellationToken::new(),
            ticker: None,
        }
    }

    /// Fire `timer` once after `delay`
    pub fn schedule_once(&self, timer: Timer, delay: Duration) {
        let event_tx = self.event_tx.clone();
        let cancel = self.root.child_token();
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    tracing::trace!(timer = timer.name(), "Timer fired");
                    let _ = event_tx.send(timer.fired(Utc::now())).await;
                }
            }
        });
    }

    /// Start sending `RevealTick` every `interval`, first tick one interval from now
    pub fn start_ticker(&mut self, interval: Duration) {
        if self.ticker.is_some() {
            tracing::warn!("Reveal ticker already running, restarting");
            self.stop_ticker();
        }

        let cancel = self.root.child_token();
        self.ticker = Some(cancel.clone());
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticks.tick() => {
                        if event_tx.send(Event::RevealTick).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    pub fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    #[cfg(test)]
    pub fn ticker_running(&self) -> bool {
        self.ticker.is_some()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
