//! Runtime for executing sessions
//!
//! Each session runs as one tokio task that owns its state and transcript.
//! HTTP handlers reach it through a [`SessionHandle`].

mod executor;
mod scheduler;
pub mod traits;


pub use executor::SessionRuntime;

use crate::matcher::Script;
use crate::state_machine::{Event, RevealStep, SessionContext, Timing};
use crate::transcript::{InMemoryTranscript, Turn};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch, RwLock};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = SessionRuntime<Arc<InMemoryTranscript>>;

const EVENT_CHANNEL_CAPACITY: usize = 32;
/// Large enough to hold a whole reveal for a slow subscriber
const BROADCAST_CAPACITY: usize = 1024;

/// Events sent to presentation subscribers
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Init {
        turns: Vec<Turn>,
        pending: bool,
    },
    Turn {
        index: usize,
        turn: Turn,
    },
    RevealStarted {
        started_at: DateTime<Utc>,
    },
    Reveal {
        step: RevealStep,
        partial_text: String,
    },
    StateChange {
        pending: bool,
    },
    Error {
        message: String,
    },
}

/// Handle to interact with a running session
pub struct SessionHandle {
    pub event_tx: mpsc::Sender<Event>,
    pub broadcast_tx: broadcast::Sender<SessionEvent>,
    pending_rx: watch::Receiver<bool>,
    transcript: Arc<InMemoryTranscript>,
    shutdown: CancellationToken,
    /// Last time a visitor submitted, subscribed or was seen subscribed
    last_active: Mutex<Instant>,
}

impl SessionHandle {
    /// Start a session runtime on the current tokio runtime
    pub fn spawn(context: SessionContext) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        let (pending_tx, pending_rx) = watch::channel(true);
        let transcript = Arc::new(InMemoryTranscript::new());
        let shutdown = CancellationToken::new();

        let runtime: ProductionRuntime = SessionRuntime::new(
            context,
            Arc::clone(&transcript),
            event_rx,
            event_tx.clone(),
            broadcast_tx.clone(),
            pending_tx,
            shutdown.clone(),
        );
        tokio::spawn(runtime.run());

        Self {
            event_tx,
            broadcast_tx,
            pending_rx,
            transcript,
            shutdown,
            last_active: Mutex::new(Instant::now()),
        }
    }

    /// Submit visitor text; blank text or text sent while a reply is
    /// pending is silently ignored by the session
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), String> {
        self.touch();
        self.event_tx
            .send(Event::UserSubmit {
                text: text.into(),
                at: Utc::now(),
            })
            .await
            .map_err(|_| "Session has stopped".to_string())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.touch();
        self.broadcast_tx.subscribe()
    }

    fn touch(&self) {
        *self
            .last_active
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    /// Whether nobody has used this session for `idle_timeout`
    ///
    /// An open stream counts as use, so a live subscriber refreshes the clock.
    fn is_idle(&self, idle_timeout: Duration) -> bool {
        if self.broadcast_tx.receiver_count() > 0 {
            self.touch();
            return false;
        }
        self.last_active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
            >= idle_timeout
    }

    pub fn is_pending(&self) -> bool {
        *self.pending_rx.borrow()
    }

    pub async fn transcript(&self) -> Vec<Turn> {
        self.transcript.snapshot().await
    }

    /// Snapshot for a newly connected subscriber
    pub async fn init_event(&self) -> SessionEvent {
        SessionEvent::Init {
            turns: self.transcript().await,
            pending: self.is_pending(),
        }
    }

    pub fn close(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Manager for all live sessions
pub struct SessionManager {
    script: Arc<Script>,
    timing: Timing,
    sessions: RwLock<HashMap<String, Arc<SessionHandle>>>,
}

impl SessionManager {
    pub fn new(script: Arc<Script>, timing: Timing) -> Self {
        Self {
            script,
            timing,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a new session, returning its id
    pub async fn create(&self) -> String {
        let session_id = uuid::Uuid::new_v4().to_string();
        let context = SessionContext::new(&session_id, Arc::clone(&self.script), self.timing);
        let handle = SessionHandle::spawn(context);

        self.sessions
            .write()
            .await
            .insert(session_id.clone(), Arc::new(handle));
        let live = self.session_count().await;
        tracing::info!(session_id = %session_id, live, "Session created");
        session_id
    }

    pub async fn get(&self, session_id: &str) -> Result<Arc<SessionHandle>, String> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| format!("Session not found: {session_id}"))
    }

    /// Stop a session's runtime and forget it
    pub async fn close(&self, session_id: &str) -> Result<(), String> {
        let handle = self
            .sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| format!("Session not found: {session_id}"))?;
        handle.close();
        let live = self.session_count().await;
        tracing::info!(session_id = %session_id, live, "Session closed");
        Ok(())
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Close every session unused for `idle_timeout`, returning how many
    pub async fn reap_idle(&self, idle_timeout: Duration) -> usize {
        let reaped: Vec<Arc<SessionHandle>> = {
            let mut sessions = self.sessions.write().await;
            let idle: Vec<String> = sessions
                .iter()
                .filter(|(_, handle)| handle.is_idle(idle_timeout))
                .map(|(id, _)| id.clone())
                .collect();
            idle.iter().filter_map(|id| sessions.remove(id)).collect()
        };

        for handle in &reaped {
            handle.close();
        }
        if !reaped.is_empty() {
            let live = self.session_count().await;
            tracing::info!(reaped = reaped.len(), live, "Reaped idle sessions");
        }
        reaped.len()
    }

    /// Sweep idle sessions periodically until the manager is dropped
    pub fn spawn_reaper(
        manager: &Arc<Self>,
        idle_timeout: Duration,
    ) -> tokio::task::JoinHandle<()> {
        let manager: Weak<Self> = Arc::downgrade(manager);
        let period = reap_period(idle_timeout);

        tokio::spawn(async move {
            let mut sweeps = interval_at(Instant::now() + period, period);
            sweeps.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                sweeps.tick().await;
                let Some(manager) = manager.upgrade() else {
                    break;
                };
                manager.reap_idle(idle_timeout).await;
            }
        })
    }
}

/// Sweep often enough that a session outlives its timeout by at most half again
fn reap_period(idle_timeout: Duration) -> Duration {
    (idle_timeout / 2).max(Duration::from_secs(1))
}
