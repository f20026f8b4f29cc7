//! Axum app: shared state and router.

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use crate::execute::execute_agent;
use crate::registry::AgentRegistry;

/// Shared state injected into the router.
pub(crate) struct AppState {
    /// Dispatch table: agent identifier → executor.
    pub(crate) registry: AgentRegistry,
    /// When set, successful outputs are persisted there as markdown reports.
    pub(crate) history_dir: Option<PathBuf>,
    /// When set, the first answered submission sends on this to signal server
    /// exit (once mode).
    shutdown_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl AppState {
    pub(crate) fn new(
        registry: AgentRegistry,
        history_dir: Option<PathBuf>,
        shutdown_tx: Option<oneshot::Sender<()>>,
    ) -> Self {
        Self {
            registry,
            history_dir,
            shutdown_tx: Mutex::new(shutdown_tx),
        }
    }

    /// Signals once-mode shutdown. No-op outside once mode or after the first
    /// submission.
    pub(crate) fn signal_done(&self) {
        let tx = self.shutdown_tx.lock().ok().and_then(|mut g| g.take());
        if let Some(tx) = tx {
            let _ = tx.send(());
        }
    }
}

/// Routes: the execution endpoint and a liveness probe (probes never trigger
/// once-mode shutdown).
pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(guichet::EXECUTE_AGENT_PATH, post(execute_agent))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
