//! LocalBackend: run executors in-process, no server involved.
//!
//! Goes through the same dispatch as the HTTP endpoint, so unknown agents,
//! executor failures and empty outputs map to the same statuses and the same
//! `detail` messages a remote submission would see.

use async_trait::async_trait;
use std::sync::Arc;

use guichet::SubmissionOutcome;
use serve::{dispatch, AgentRegistry, EchoExecutor, Fields};

use super::{BackendError, SubmitBackend};
use crate::forms::FormsFile;

pub struct LocalBackend {
    registry: AgentRegistry,
}

impl LocalBackend {
    /// Echo executors for every configured form.
    pub fn new(forms: &FormsFile) -> Self {
        let mut registry = AgentRegistry::new();
        for form in &forms.forms {
            registry.register(Arc::new(EchoExecutor::new(form.agent.clone())));
        }
        Self { registry }
    }

    /// Caller-provided executors.
    pub fn with_registry(registry: AgentRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl SubmitBackend for LocalBackend {
    async fn submit(
        &self,
        agent: &str,
        fields: &[(String, String)],
    ) -> Result<SubmissionOutcome, BackendError> {
        let mut map = Fields::new();
        for (name, value) in fields {
            map.insert(name.clone(), value.clone());
        }

        let outcome = match dispatch(&self.registry, agent, &map).await {
            Ok(output) => SubmissionOutcome::Success {
                output: Some(output),
            },
            Err(e) => SubmissionOutcome::AgentError {
                status: e.status(),
                detail: Some(e.to_string()),
            },
        };
        Ok(outcome)
    }
}
