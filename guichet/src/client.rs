//! HTTP client for the agent-execution endpoint.
//!
//! One `POST /execute_agent` per submission, JSON in and JSON out. A 2xx status
//! is a success (body parsed for the optional `output` field); any other status
//! is an application failure (body parsed, best effort, for the optional
//! `detail` field). Everything the transport throws (unreachable host, body
//! read failure, malformed JSON) folds into [`ClientError::Transport`], except
//! an elapsed bounded timeout which gets its own kind.

use std::time::Duration;
use thiserror::Error;

use crate::payload::Payload;

/// Endpoint path, fixed by the wire contract.
pub const EXECUTE_AGENT_PATH: &str = "/execute_agent";

/// Success-response body. `output` is optional; absence (or any body shape
/// without a string `output`) is tolerated and rendered as a fixed fallback
/// upstream.
#[derive(Clone, Debug)]
pub struct AgentReply {
    pub output: Option<String>,
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// Non-2xx response. `detail` is the server's message when the body had one.
    #[error("agent endpoint returned HTTP {status}")]
    Agent { status: u16, detail: Option<String> },
    /// Connection-level failure: unreachable endpoint, interrupted body,
    /// malformed JSON.
    #[error("{0}")]
    Transport(String),
    /// The configured bounded timeout elapsed before a response settled.
    #[error("request timed out after {0}s")]
    TimedOut(u64),
}

/// Client for one agent-execution endpoint.
///
/// Cheap to clone (the underlying `reqwest::Client` is a handle). By default no
/// timeout is applied: a hung request stays in flight indefinitely, and the
/// submit control of the owning form stays disabled for as long.
#[derive(Clone, Debug)]
pub struct AgentClient {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: Option<u64>,
}

impl AgentClient {
    /// Client without a timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, None)
    }

    /// Client with a bounded per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, secs: u64) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(secs))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self::with_client(http, base_url, Some(secs)))
    }

    /// Client over a caller-configured `reqwest::Client` (proxies, TLS, ...).
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            EXECUTE_AGENT_PATH
        )
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        match self.timeout_secs {
            Some(secs) if e.is_timeout() => ClientError::TimedOut(secs),
            _ => ClientError::Transport(e.to_string()),
        }
    }

    /// Performs the single network call for one submission.
    pub async fn execute(&self, payload: &Payload) -> Result<AgentReply, ClientError> {
        let res = self
            .http
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();
        if status.is_success() {
            // A malformed success body is a connection-level failure. Valid
            // JSON of any shape is fine; `output` counts only when it is a
            // string.
            let body: serde_json::Value =
                res.json().await.map_err(|e| self.transport_error(e))?;
            Ok(AgentReply {
                output: body
                    .get("output")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            })
        } else {
            let detail = res
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));
            Err(ClientError::Agent {
                status: status.as_u16(),
                detail,
            })
        }
    }
}
