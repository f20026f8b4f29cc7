//! Registry dispatch shared by the HTTP handler and in-process callers.

use thiserror::Error;

use crate::registry::{AgentRegistry, Fields};

/// Failure detail when an executor completes without producing output.
pub const NO_RESULT_DETAIL: &str = "L'agent n'a produit aucun résultat.";

/// One dispatch failure; `Display` is the user-facing `detail` text.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Agent '{0}' non valide ou non appelable directement.")]
    UnknownAgent(String),
    #[error("{0}")]
    Failed(String),
    #[error("{}", NO_RESULT_DETAIL)]
    NoResult,
}

impl DispatchError {
    /// HTTP status this failure maps to.
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::UnknownAgent(_) => 400,
            DispatchError::Failed(_) | DispatchError::NoResult => 500,
        }
    }
}

/// Runs one submission against the registry and returns the markdown output.
pub async fn dispatch(
    registry: &AgentRegistry,
    agent: &str,
    fields: &Fields,
) -> Result<String, DispatchError> {
    let Some(executor) = registry.get(agent) else {
        return Err(DispatchError::UnknownAgent(agent.to_string()));
    };
    let output = executor
        .execute(fields)
        .await
        .map_err(|e| DispatchError::Failed(e.to_string()))?;
    if output.trim().is_empty() {
        return Err(DispatchError::NoResult);
    }
    Ok(output)
}
