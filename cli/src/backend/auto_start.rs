//! Auto-start the endpoint (`guichet serve`) when the remote refuses
//! connections, so a first submission works without manually running a server.
//!
//! The check is deliberately conservative: only an obvious connection-refused
//! triggers a spawn. Other errors (DNS, TLS, protocol) surface unchanged so
//! they are not masked by a pointless server start.

use std::process::Stdio;
use std::time::Duration;

const POLL_INTERVAL_MS: u64 = 200;
const MAX_WAIT_MS: u64 = 15000;

/// Spawns `guichet serve --keep-alive` in the background.
///
/// `--keep-alive` keeps the server up after the first submission so later CLI
/// calls reuse it. stdout/stderr are discarded: the CLI's stdout must stay
/// clean (only outputs and JSON).
pub fn spawn_serve() -> Result<std::process::Child, std::io::Error> {
    let exe = std::env::current_exe()?;
    std::process::Command::new(exe)
        .arg("serve")
        .arg("--keep-alive")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

async fn probe(base_url: &str) -> Result<(), reqwest::Error> {
    reqwest::Client::new()
        .get(format!("{}/health", base_url.trim_end_matches('/')))
        .timeout(Duration::from_secs(2))
        .send()
        .await
        .map(|_| ())
}

fn is_connection_refused(e: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(e);
    while let Some(err) = source {
        if err.to_string().contains("refused") {
            return true;
        }
        source = err.source();
    }
    false
}

/// Polls the endpoint's health route until it answers or the wait budget runs
/// out. Any HTTP answer counts as ready.
pub async fn wait_for_server(base_url: &str) -> bool {
    let start = std::time::Instant::now();
    let max_wait = Duration::from_millis(MAX_WAIT_MS);
    let interval = Duration::from_millis(POLL_INTERVAL_MS);

    while start.elapsed() < max_wait {
        if probe(base_url).await.is_ok() {
            return true;
        }
        tokio::time::sleep(interval).await;
    }
    false
}

/// Ensures the endpoint is reachable: probe once, spawn `guichet serve` on
/// connection-refused, then wait for readiness.
pub async fn ensure_server_or_spawn(base_url: &str) -> Result<(), String> {
    match probe(base_url).await {
        Ok(()) => return Ok(()),
        Err(e) => {
            if !is_connection_refused(&e) {
                return Err(e.to_string());
            }
        }
    }

    eprintln!("guichet: remote not running, starting server...");
    spawn_serve().map_err(|e| e.to_string())?;
    tokio::time::sleep(Duration::from_millis(500)).await;
    if wait_for_server(base_url).await {
        Ok(())
    } else {
        Err("server failed to become ready".to_string())
    }
}
