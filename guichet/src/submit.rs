//! The submission flow: per-form controllers over a shared results region.
//!
//! One submission runs strictly in order: hide the region, enter the in-flight
//! control state, build the payload, perform the single network call, publish
//! the outcome, restore the control. Every failure folds into a
//! [`SubmissionOutcome`] value before the control is touched again, so the
//! restore step runs on every path.

use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

use crate::client::{AgentClient, ClientError};
use crate::form::{FormSpec, SubmitControl};
use crate::payload::build_payload;
use crate::region::SharedResults;
use crate::render::{
    connection_error_html, error_html, markdown_to_html, NO_OUTPUT_FALLBACK,
    UNKNOWN_ERROR_DETAIL,
};

/// Terminal state of one submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// 2xx response; `output` is the markdown text when the server sent one.
    Success { output: Option<String> },
    /// Non-2xx response; `detail` is the server's message when the body had one.
    AgentError {
        #[serde(rename = "status_code")]
        status: u16,
        detail: Option<String>,
    },
    /// The request never produced a usable response.
    ConnectionError { description: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }

    /// Markdown text of a success outcome, with the fixed fallback for a
    /// missing `output` field.
    pub fn output_or_fallback(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Success { output } => {
                Some(output.as_deref().unwrap_or(NO_OUTPUT_FALLBACK))
            }
            _ => None,
        }
    }

    /// Plain-text rendition of the outcome (the region holds the HTML one).
    pub fn text(&self) -> String {
        match self {
            SubmissionOutcome::Success { output } => {
                output.as_deref().unwrap_or(NO_OUTPUT_FALLBACK).to_string()
            }
            SubmissionOutcome::AgentError { detail, .. } => {
                format!("Erreur: {}", detail.as_deref().unwrap_or(UNKNOWN_ERROR_DETAIL))
            }
            SubmissionOutcome::ConnectionError { description } => {
                format!("Erreur de connexion: {description}")
            }
        }
    }

    /// Region markup for this outcome. The success fallback goes through the
    /// markdown renderer like any other output.
    pub fn to_html(&self) -> String {
        match self {
            SubmissionOutcome::Success { output } => {
                markdown_to_html(output.as_deref().unwrap_or(NO_OUTPUT_FALLBACK))
            }
            SubmissionOutcome::AgentError { detail, .. } => {
                error_html(detail.as_deref().unwrap_or(UNKNOWN_ERROR_DETAIL))
            }
            SubmissionOutcome::ConnectionError { description } => {
                connection_error_html(description)
            }
        }
    }
}

impl From<ClientError> for SubmissionOutcome {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Agent { status, detail } => {
                SubmissionOutcome::AgentError { status, detail }
            }
            ClientError::Transport(description) => {
                SubmissionOutcome::ConnectionError { description }
            }
            ClientError::TimedOut(secs) => SubmissionOutcome::ConnectionError {
                description: format!("délai d'attente dépassé ({secs}s)"),
            },
        }
    }
}

/// One registered form: agent identity, submit-control state, endpoint client
/// and the shared region.
///
/// Controllers are independent: a slow or failing request on one form never
/// blocks another. The disabled control is the sole guard against overlapping
/// submissions of the same form, and it is advisory: calling
/// [`FormController::submit`] while in flight starts a second request anyway,
/// and the last one to settle wins the region.
#[derive(Debug)]
pub struct FormController {
    spec: FormSpec,
    control: Mutex<SubmitControl>,
    client: AgentClient,
    region: SharedResults,
}

impl FormController {
    pub fn new(spec: FormSpec, client: AgentClient, region: SharedResults) -> Self {
        let control = Mutex::new(SubmitControl::new(spec.submit_label.clone()));
        Self {
            spec,
            control,
            client,
            region,
        }
    }

    pub fn agent(&self) -> &str {
        &self.spec.agent
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock_control().is_disabled()
    }

    pub fn control_label(&self) -> String {
        self.lock_control().label().to_string()
    }

    fn lock_control(&self) -> std::sync::MutexGuard<'_, SubmitControl> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs one submission to completion. Never returns early: the outcome is
    /// published to the region and the control restored on every path.
    pub async fn submit(&self, fields: &[(String, String)]) -> SubmissionOutcome {
        let submission_id = Uuid::new_v4();
        tracing::info!(
            %submission_id,
            agent = %self.spec.agent,
            fields = fields.len(),
            "submitting form"
        );

        self.region.hide();
        self.lock_control().begin_flight();

        let payload = build_payload(&self.spec.agent, fields);
        let outcome = match self.client.execute(&payload).await {
            Ok(reply) => SubmissionOutcome::Success {
                output: reply.output,
            },
            Err(e) => {
                tracing::warn!(%submission_id, agent = %self.spec.agent, error = %e, "submission failed");
                SubmissionOutcome::from(e)
            }
        };

        self.region.publish(outcome.to_html());
        self.lock_control().restore();

        tracing::debug!(%submission_id, success = outcome.is_success(), "submission settled");
        outcome
    }
}

/// A fixed set of form controllers bound at startup, sharing one results
/// region and one endpoint client.
#[derive(Debug)]
pub struct Console {
    client: AgentClient,
    region: SharedResults,
    forms: Vec<Arc<FormController>>,
}

impl Console {
    pub fn new(client: AgentClient) -> Self {
        Self {
            client,
            region: SharedResults::new(),
            forms: Vec::new(),
        }
    }

    /// Registers a form and returns its controller.
    pub fn bind(&mut self, spec: FormSpec) -> Arc<FormController> {
        let controller = Arc::new(FormController::new(
            spec,
            self.client.clone(),
            self.region.clone(),
        ));
        self.forms.push(controller.clone());
        controller
    }

    /// Looks a form up by agent identifier.
    pub fn form(&self, agent: &str) -> Option<Arc<FormController>> {
        self.forms.iter().find(|f| f.agent() == agent).cloned()
    }

    pub fn forms(&self) -> &[Arc<FormController>] {
        &self.forms
    }

    pub fn results(&self) -> SharedResults {
        self.region.clone()
    }
}
