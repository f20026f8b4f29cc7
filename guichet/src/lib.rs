//! # Guichet
//!
//! Core library for submitting **agent forms**: named forms whose field values are
//! flattened into a JSON payload and posted to an agent-execution endpoint
//! (`POST /execute_agent`), with the returned markdown rendered as HTML into a
//! shared results region.
//!
//! ## Design principles
//!
//! - **Explicit per-form state**: each form is a [`FormController`] owning its own
//!   submit-control state (idle/in-flight flag, original label). Nothing is shared
//!   between forms except the results region.
//! - **One request per submission**: a submission performs exactly one network call;
//!   there is no retry and, by default, no timeout. Overlapping submissions both
//!   complete and the last to settle wins the shared region.
//! - **Every failure is an outcome**: transport errors, application failures and
//!   malformed responses all fold into a [`SubmissionOutcome`] that is published to
//!   the region, so restoring the submit control is unconditional.
//!
//! ## Main modules
//!
//! - [`form`]: [`FormSpec`], [`SubmitControl`] — form identity and control state.
//! - [`payload`]: payload construction (field flattening + mandatory `agent` key).
//! - [`client`]: [`AgentClient`], [`ClientError`] — the HTTP call and its error taxonomy.
//! - [`render`]: markdown→HTML and the error/fallback markup.
//! - [`region`]: [`ResultsRegion`], [`SharedResults`] — the shared, last-write-wins region.
//! - [`submit`]: [`FormController`], [`Console`], [`SubmissionOutcome`] — the submission flow.
//!
//! Key types are re-exported at crate root:
//! `use guichet::{AgentClient, Console, FormSpec, SubmissionOutcome};`

pub mod client;
pub mod form;
pub mod payload;
pub mod region;
pub mod render;
pub mod submit;

pub use client::{AgentClient, AgentReply, ClientError, EXECUTE_AGENT_PATH};
pub use form::{FormSpec, SubmitControl, IN_FLIGHT_LABEL};
pub use payload::{build_payload, Payload, AGENT_KEY};
pub use region::{ResultsRegion, SharedResults};
pub use render::{
    connection_error_html, error_html, markdown_to_html, NO_OUTPUT_FALLBACK,
    UNKNOWN_ERROR_DETAIL,
};
pub use submit::{Console, FormController, SubmissionOutcome};
