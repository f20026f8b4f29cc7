//! RemoteBackend: submit forms to a running agent endpoint over HTTP.

use async_trait::async_trait;
use guichet::{AgentClient, Console, SharedResults, SubmissionOutcome};

use super::auto_start::ensure_server_or_spawn;
use super::{BackendError, SubmitBackend};
use crate::forms::FormsFile;

pub struct RemoteBackend {
    console: Console,
    base_url: String,
    auto_start: bool,
}

impl RemoteBackend {
    /// Binds every configured form against the remote endpoint.
    ///
    /// `timeout_secs`: bounded per-request timeout; `None` keeps the
    /// platform's no-timeout behavior. `auto_start`: spawn `guichet serve`
    /// when the endpoint refuses connections.
    pub fn new(
        base_url: impl Into<String>,
        timeout_secs: Option<u64>,
        auto_start: bool,
        forms: &FormsFile,
    ) -> Result<Self, BackendError> {
        let base_url = base_url.into();
        let client = match timeout_secs {
            Some(secs) => AgentClient::with_timeout(base_url.as_str(), secs)?,
            None => AgentClient::new(base_url.as_str()),
        };
        let mut console = Console::new(client);
        for form in &forms.forms {
            console.bind(form.to_spec());
        }
        Ok(Self {
            console,
            base_url,
            auto_start,
        })
    }

    /// Results region shared by every bound form.
    pub fn results(&self) -> SharedResults {
        self.console.results()
    }
}

#[async_trait]
impl SubmitBackend for RemoteBackend {
    async fn submit(
        &self,
        agent: &str,
        fields: &[(String, String)],
    ) -> Result<SubmissionOutcome, BackendError> {
        let controller = self
            .console
            .form(agent)
            .ok_or_else(|| BackendError::UnknownForm(agent.to_string()))?;

        if self.auto_start {
            // Best effort: if the endpoint cannot be reached even after a
            // spawn attempt, the submission below reports the connection error
            // through the normal outcome path.
            if let Err(e) = ensure_server_or_spawn(&self.base_url).await {
                tracing::warn!(error = %e, "auto-start failed, submitting anyway");
            }
        }

        Ok(controller.submit(fields).await)
    }
}
