//! Backend abstraction used by the `guichet` CLI.
//!
//! Two execution modes:
//! - **RemoteBackend**: submit over HTTP to a running agent endpoint (default).
//! - **LocalBackend**: run executors in-process, no server involved.
//!
//! Callers depend only on [`SubmitBackend`], so switching local/remote is a
//! one-line decision in `main.rs`.

mod auto_start;
mod local;
mod remote;

pub use auto_start::{ensure_server_or_spawn, spawn_serve, wait_for_server};
pub use local::LocalBackend;
pub use remote::RemoteBackend;

use async_trait::async_trait;
use guichet::SubmissionOutcome;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("forme inconnue: {0}")]
    UnknownForm(String),
    #[error("client: {0}")]
    Client(#[from] guichet::ClientError),
}

#[async_trait]
pub trait SubmitBackend: Send + Sync {
    /// Runs one submission for `agent` with the given field values.
    ///
    /// Every request-level failure (unreachable endpoint, failure status,
    /// malformed body, timeout) is part of the returned outcome, not an `Err`;
    /// `Err` is reserved for forms that are not bound at all.
    async fn submit(
        &self,
        agent: &str,
        fields: &[(String, String)],
    ) -> Result<SubmissionOutcome, BackendError>;
}
