//! Persist successful outputs as timestamped markdown reports.
//!
//! File name: `<YYYYmmdd_HHMMSS>_<agent>_<sanitized objective>.md` under the
//! history directory. The objective comes from the submission's `objective`
//! field when present.

use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::registry::Fields;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("create history dir: {0}")]
    CreateDir(std::io::Error),
    #[error("write report: {0}")]
    Write(std::io::Error),
}

/// First 30 characters of the objective, keeping only alphanumerics, spaces,
/// underscores and dashes, trimmed.
fn safe_objective(objective: &str) -> String {
    objective
        .chars()
        .take(30)
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Writes one report. Returns the path of the written file.
pub fn save_report(
    dir: &Path,
    agent: &str,
    fields: &Fields,
    output: &str,
) -> Result<PathBuf, HistoryError> {
    std::fs::create_dir_all(dir).map_err(HistoryError::CreateDir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let objective = fields.get("objective").map(String::as_str).unwrap_or("");
    let path = dir.join(format!(
        "{timestamp}_{agent}_{}.md",
        safe_objective(objective)
    ));

    std::fs::write(&path, output).map_err(HistoryError::Write)?;
    tracing::info!(path = %path.display(), "report saved");
    Ok(path)
}
