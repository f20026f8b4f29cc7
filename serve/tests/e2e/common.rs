//! Shared helpers for e2e tests. Received responses are logged with
//! `[e2e] received: ...`; run with `--nocapture` to see them.

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use serve::{AgentExecutor, AgentRegistry, EchoExecutor, ExecuteError, Fields};

/// Binds a random port and spawns the server in once mode.
/// Returns `(base_url, server_handle)`.
pub async fn spawn_server_once(
    registry: AgentRegistry,
    history_dir: Option<PathBuf>,
) -> (
    String,
    tokio::task::JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>,
) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);
    let handle = tokio::spawn(serve::run_serve_on_listener(
        listener,
        registry,
        history_dir,
        true,
    ));
    (url, handle)
}

/// Registry with one echo executor.
pub fn echo_registry(agent: &str) -> AgentRegistry {
    let mut registry = AgentRegistry::new();
    registry.register(Arc::new(EchoExecutor::new(agent)));
    registry
}

/// Posts a JSON body to `/execute_agent` and returns `(status, parsed body)`.
pub async fn post_execute(base_url: &str, body: &Value) -> (u16, Value) {
    let res = reqwest::Client::new()
        .post(format!("{base_url}/execute_agent"))
        .json(body)
        .send()
        .await
        .unwrap();
    let status = res.status().as_u16();
    let text = res.text().await.unwrap();
    eprintln!("[e2e] received: {status} {text}");
    let parsed = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, parsed)
}

/// Executor that always fails, for the 500 path.
pub struct FailingExecutor;

#[async_trait]
impl AgentExecutor for FailingExecutor {
    fn name(&self) -> &str {
        "failing"
    }

    async fn execute(&self, _fields: &Fields) -> Result<String, ExecuteError> {
        Err(ExecuteError::Failed("le moteur est tombé".to_string()))
    }
}

/// Executor that completes without output, for the no-result path.
pub struct SilentExecutor;

#[async_trait]
impl AgentExecutor for SilentExecutor {
    fn name(&self) -> &str {
        "silent"
    }

    async fn execute(&self, _fields: &Fields) -> Result<String, ExecuteError> {
        Ok(String::new())
    }
}
