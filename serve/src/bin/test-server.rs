//! Standalone endpoint with echo executors, for manual testing:
//! `cargo run -p serve --features test-server --bin test-server`.
//!
//! Address from `GUICHET_ADDR` (default `127.0.0.1:8000`).

use std::sync::Arc;

use serve::{run_serve, AgentRegistry, EchoExecutor};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut registry = AgentRegistry::new();
    for agent in ["echo", "planner", "researcher", "coder", "writer"] {
        registry.register(Arc::new(EchoExecutor::new(agent)));
    }

    let addr = std::env::var("GUICHET_ADDR").ok();
    run_serve(addr.as_deref(), registry, None, false).await
}
