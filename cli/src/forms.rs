//! Form definitions: which forms exist, which agent each one invokes and which
//! fields it prompts for.
//!
//! Definitions are YAML, embedded at compile time for the defaults and parsed
//! at runtime when a file is configured (`--forms` / `GUICHET_FORMS`).

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use guichet::FormSpec;

const DEFAULT_FORMS_YAML: &str = include_str!("forms.yaml");

#[derive(Error, Debug)]
pub enum FormsError {
    #[error("read forms file: {0}")]
    Read(std::io::Error),
    #[error("parse forms yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("no forms defined")]
    Empty,
    #[error("duplicate form '{0}'")]
    Duplicate(String),
}

/// One named input field of a form.
#[derive(Clone, Debug, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Hint for interactive prompting; the value stays a plain string.
    #[serde(default)]
    pub multiline: bool,
}

impl FieldDef {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// One agent form.
#[derive(Clone, Debug, Deserialize)]
pub struct FormDef {
    pub agent: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    submit_label: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl FormDef {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.agent)
    }

    pub fn submit_label(&self) -> String {
        self.submit_label
            .clone()
            .unwrap_or_else(|| format!("Lancer : {}", self.title()))
    }

    pub fn to_spec(&self) -> FormSpec {
        FormSpec::new(&self.agent, self.submit_label())
    }

    /// Names of required fields missing from `provided`.
    pub fn missing_required<'a>(&'a self, provided: &[(String, String)]) -> Vec<&'a str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| {
                !provided
                    .iter()
                    .any(|(name, value)| name == &f.name && !value.trim().is_empty())
            })
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// The full set of configured forms.
#[derive(Clone, Debug, Deserialize)]
pub struct FormsFile {
    pub forms: Vec<FormDef>,
}

impl FormsFile {
    pub fn get(&self, agent: &str) -> Option<&FormDef> {
        self.forms.iter().find(|f| f.agent == agent)
    }
}

fn parse(yaml: &str) -> Result<FormsFile, FormsError> {
    let file: FormsFile = serde_yaml::from_str(yaml)?;
    if file.forms.is_empty() {
        return Err(FormsError::Empty);
    }
    for (i, form) in file.forms.iter().enumerate() {
        if file.forms[..i].iter().any(|f| f.agent == form.agent) {
            return Err(FormsError::Duplicate(form.agent.clone()));
        }
    }
    Ok(file)
}

/// The embedded default forms.
pub fn load_default() -> Result<FormsFile, FormsError> {
    parse(DEFAULT_FORMS_YAML)
}

pub fn load_from_path(path: &Path) -> Result<FormsFile, FormsError> {
    let content = std::fs::read_to_string(path).map_err(FormsError::Read)?;
    parse(&content)
}
