//! Submission payload construction.
//!
//! Field name/value pairs are flattened into one JSON object (duplicate names:
//! last write wins), then the form's agent identifier is inserted under
//! [`AGENT_KEY`]. The agent entry goes in last, so it always takes precedence
//! over a field that happens to be named `agent`.

use serde_json::{Map, Value};

/// Payload key carrying the agent identifier. Always present.
pub const AGENT_KEY: &str = "agent";

/// One submission payload: a JSON object of string fields plus the `agent` entry.
pub type Payload = Map<String, Value>;

/// Builds the payload for one submission.
pub fn build_payload(agent: &str, fields: &[(String, String)]) -> Payload {
    let mut payload = Map::with_capacity(fields.len() + 1);
    for (name, value) in fields {
        payload.insert(name.clone(), Value::String(value.clone()));
    }
    payload.insert(AGENT_KEY.to_string(), Value::String(agent.to_string()));
    payload
}
