//! Form identity and submit-control state.
//!
//! A form is identified by the agent it invokes; its submit control carries the
//! idle/in-flight state and the label swap (`En cours...` while a request is
//! pending, original label restored afterward).

/// Label shown on a submit control while its request is in flight.
pub const IN_FLIGHT_LABEL: &str = "En cours...";

/// Identity of one agent form: which agent it invokes and what its submit
/// control says when idle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSpec {
    /// Agent identifier sent under the `agent` payload key. Opaque to this crate.
    pub agent: String,
    /// Idle label of the submit control (e.g. `Lancer le Planificateur`).
    pub submit_label: String,
}

impl FormSpec {
    pub fn new(agent: impl Into<String>, submit_label: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            submit_label: submit_label.into(),
        }
    }
}

/// Mutable state of one form's submit control.
///
/// The disabled flag is the sole guard against overlapping submissions of the
/// same form, and it is advisory: callers that submit anyway get a second,
/// independent request (see [`crate::submit::FormController`]).
#[derive(Clone, Debug)]
pub struct SubmitControl {
    disabled: bool,
    label: String,
    original_label: String,
}

impl SubmitControl {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            disabled: false,
            original_label: label.clone(),
            label,
        }
    }

    /// Enters the in-flight state: disables the control and swaps the label.
    pub fn begin_flight(&mut self) {
        self.disabled = true;
        self.label = IN_FLIGHT_LABEL.to_string();
    }

    /// Leaves the in-flight state: re-enables the control and restores the
    /// original label. Safe to call in any state.
    pub fn restore(&mut self) {
        self.disabled = false;
        self.label = self.original_label.clone();
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn original_label(&self) -> &str {
        &self.original_label
    }
}
