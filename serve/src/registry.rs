//! Executor registry: the dispatch table behind `/execute_agent`.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

/// Submitted fields for one execution: every payload entry except `agent`.
pub type Fields = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("{0}")]
    Failed(String),
}

/// One server-side operation a form can invoke.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Agent identifier this executor answers to.
    fn name(&self) -> &str;

    /// Produces the markdown report for one submission.
    async fn execute(&self, fields: &Fields) -> Result<String, ExecuteError>;
}

/// Immutable-after-build dispatch table, cloned into the app state.
#[derive(Clone, Default)]
pub struct AgentRegistry {
    executors: HashMap<String, Arc<dyn AgentExecutor>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an executor under its own name. Re-registering a name
    /// replaces the previous executor.
    pub fn register(&mut self, executor: Arc<dyn AgentExecutor>) {
        self.executors
            .insert(executor.name().to_string(), executor);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentExecutor>> {
        self.executors.get(name).cloned()
    }

    /// Registered agent names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.executors.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }
}

/// Echoes the submitted fields back as a small markdown report. Lets the whole
/// platform run end-to-end without any real agent behind the endpoint.
pub struct EchoExecutor {
    name: String,
}

impl EchoExecutor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl AgentExecutor for EchoExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, fields: &Fields) -> Result<String, ExecuteError> {
        let mut report = format!("# Écho — {}\n\n", self.name);
        if fields.is_empty() {
            report.push_str("_Aucun champ soumis._\n");
        } else {
            for (name, value) in fields {
                report.push_str(&format!("- **{name}** : {value}\n"));
            }
        }
        Ok(report)
    }
}
