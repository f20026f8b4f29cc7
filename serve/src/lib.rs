//! HTTP endpoint for guichet (axum).
//!
//! Exposes `POST /execute_agent` over a registry of named executors, plus
//! `GET /health`. The wire contract matches what [`guichet::AgentClient`]
//! consumes: 200 `{"output": <markdown>}` on success, non-2xx
//! `{"detail": <message>}` on failure.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`AgentRegistry`],
//! [`AgentExecutor`], [`EchoExecutor`].

mod app;
pub mod dispatch;
mod execute;
pub mod history;
mod registry;

use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::info;

pub use dispatch::{dispatch, DispatchError, NO_RESULT_DETAIL};
pub use history::{save_report, HistoryError};
pub use registry::{AgentExecutor, AgentRegistry, EchoExecutor, ExecuteError, Fields};

use app::{router, AppState};

/// Default bind address of the agent-execution endpoint.
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";

/// Runs the endpoint on an existing listener. Used by tests (bind to
/// `127.0.0.1:0` then pass the listener). When `once` is true, serves until one
/// `/execute_agent` request has been answered, then returns.
pub async fn run_serve_on_listener(
    listener: TcpListener,
    registry: AgentRegistry,
    history_dir: Option<PathBuf>,
    once: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!("agent endpoint listening on http://{}", addr);
    if once {
        info!("will exit after the first submission is answered (once mode, used by tests)");
    }

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let state = Arc::new(AppState::new(
        registry,
        history_dir,
        once.then_some(shutdown_tx),
    ));
    let app = router(state);

    if once {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await?;
        info!("submission answered, exiting (once mode)");
    } else {
        axum::serve(listener, app).await?;
    }
    Ok(())
}

/// Runs the endpoint. Listens on `addr` (default `127.0.0.1:8000`).
pub async fn run_serve(
    addr: Option<&str>,
    registry: AgentRegistry,
    history_dir: Option<PathBuf>,
    once: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = addr.unwrap_or(DEFAULT_HTTP_ADDR);
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, registry, history_dir, once).await
}
