//! Run an echo endpoint and submit to it from the same process.
//!
//! `cargo run -p guichet-examples --example echo_endpoint`

use std::sync::Arc;

use guichet::{AgentClient, Console, FormSpec};
use serve::{AgentRegistry, EchoExecutor};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let mut registry = AgentRegistry::new();
    registry.register(Arc::new(EchoExecutor::new("echo")));
    tokio::spawn(serve::run_serve_on_listener(listener, registry, None, false));

    let mut console = Console::new(AgentClient::new(format!("http://{addr}")));
    let echo = console.bind(FormSpec::new("echo", "Envoyer"));

    let outcome = echo
        .submit(&[
            ("objective".to_string(), "dire bonjour".to_string()),
            ("context".to_string(), "exemple".to_string()),
        ])
        .await;

    println!("{}", outcome.text());
    Ok(())
}
