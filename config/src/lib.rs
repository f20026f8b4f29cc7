//! Typed settings for guichet, resolved with priority:
//! **existing env > project `.env` > XDG `~/.config/guichet/config.toml`**,
//! falling back to built-in defaults.
//!
//! Environment keys: `GUICHET_REMOTE_URL`, `GUICHET_TIMEOUT_SECS`,
//! `GUICHET_FORMS`, `GUICHET_HISTORY_DIR`, `GUICHET_NO_AUTO_START`.
//! The TOML file uses the same settings as plain top-level keys
//! (`remote_url`, `timeout_secs`, `forms`, `history_dir`, `no_auto_start`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_NAME: &str = "guichet";

/// Default agent-execution endpoint.
pub const DEFAULT_REMOTE_URL: &str = "http://127.0.0.1:8000";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Resolved settings shared by the cli and the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the agent-execution endpoint.
    pub remote_url: String,
    /// Bounded per-request timeout in seconds. `None` (the default) means no
    /// timeout at all: a hung request stays pending indefinitely.
    pub timeout_secs: Option<u64>,
    /// Path to the form definitions file; the embedded defaults are used when unset.
    pub forms: Option<PathBuf>,
    /// Directory for persisted reports; history is disabled when unset.
    pub history_dir: Option<PathBuf>,
    /// Never auto-start a local server on connection refused.
    pub no_auto_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            timeout_secs: None,
            forms: None,
            history_dir: None,
            no_auto_start: false,
        }
    }
}

/// Optional-everything mirror of `Settings` for the TOML file.
#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    remote_url: Option<String>,
    timeout_secs: Option<u64>,
    forms: Option<PathBuf>,
    history_dir: Option<PathBuf>,
    no_auto_start: Option<bool>,
}

fn load_xdg_file() -> Result<ConfigFile, LoadError> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join(APP_NAME).join("config.toml");
    if !path.is_file() {
        return Ok(ConfigFile::default());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    Ok(toml::from_str(&content)?)
}

/// Reads the project `.env` into a map without touching the process
/// environment (so existing env always keeps priority).
fn load_dotenv_map(override_dir: Option<&Path>) -> Result<HashMap<String, String>, LoadError> {
    let dir = match override_dir {
        Some(d) => d.to_path_buf(),
        None => match std::env::current_dir() {
            Ok(d) => d,
            Err(_) => return Ok(HashMap::new()),
        },
    };
    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let iter = dotenv::from_path_iter(&path).map_err(|e| LoadError::DotenvRead(e.to_string()))?;
    let mut out = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| LoadError::DotenvRead(e.to_string()))?;
        out.insert(key, value);
    }
    Ok(out)
}

fn truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes")
}

impl Settings {
    /// Loads settings. `override_dir`: look for `.env` there instead of the
    /// current directory (used by tests).
    pub fn load(override_dir: Option<&Path>) -> Result<Self, LoadError> {
        let file = load_xdg_file()?;
        let dotenv_map = load_dotenv_map(override_dir)?;
        let lookup = |key: &str| -> Option<String> {
            std::env::var(key).ok().or_else(|| dotenv_map.get(key).cloned())
        };

        let timeout_secs = match lookup("GUICHET_TIMEOUT_SECS") {
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| LoadError::InvalidValue {
                key: "GUICHET_TIMEOUT_SECS",
                value: raw,
            })?),
            None => file.timeout_secs,
        };

        Ok(Self {
            remote_url: lookup("GUICHET_REMOTE_URL")
                .or(file.remote_url)
                .unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string()),
            timeout_secs,
            forms: lookup("GUICHET_FORMS").map(PathBuf::from).or(file.forms),
            history_dir: lookup("GUICHET_HISTORY_DIR")
                .map(PathBuf::from)
                .or(file.history_dir),
            no_auto_start: lookup("GUICHET_NO_AUTO_START")
                .map(|v| truthy(&v))
                .or(file.no_auto_start)
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Tests mutate process-wide env vars; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_guichet_env() {
        for key in [
            "GUICHET_REMOTE_URL",
            "GUICHET_TIMEOUT_SECS",
            "GUICHET_FORMS",
            "GUICHET_HISTORY_DIR",
            "GUICHET_NO_AUTO_START",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_guichet_env();
        let empty = tempfile::tempdir().unwrap();
        let prev_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", empty.path());

        let settings = Settings::load(Some(empty.path())).unwrap();

        match prev_xdg {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.remote_url, DEFAULT_REMOTE_URL);
    }

    #[test]
    fn env_wins_over_dotenv() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_guichet_env();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "GUICHET_REMOTE_URL=http://dotenv:1\n",
        )
        .unwrap();
        env::set_var("GUICHET_REMOTE_URL", "http://env:1");

        let settings = Settings::load(Some(dir.path())).unwrap();
        clear_guichet_env();

        assert_eq!(settings.remote_url, "http://env:1");
    }

    #[test]
    fn dotenv_wins_over_xdg_toml() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_guichet_env();
        let xdg = tempfile::tempdir().unwrap();
        let app_dir = xdg.path().join("guichet");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(
            app_dir.join("config.toml"),
            "remote_url = \"http://toml:1\"\ntimeout_secs = 30\n",
        )
        .unwrap();
        let project = tempfile::tempdir().unwrap();
        std::fs::write(
            project.path().join(".env"),
            "GUICHET_REMOTE_URL=http://dotenv:1\n",
        )
        .unwrap();

        let prev_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", xdg.path());
        let settings = Settings::load(Some(project.path())).unwrap();
        match prev_xdg {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(settings.remote_url, "http://dotenv:1");
        // Keys absent from env and .env still come from the file.
        assert_eq!(settings.timeout_secs, Some(30));
    }

    #[test]
    fn invalid_timeout_is_a_typed_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_guichet_env();
        let empty = tempfile::tempdir().unwrap();
        env::set_var("GUICHET_TIMEOUT_SECS", "soon");

        let result = Settings::load(Some(empty.path()));
        clear_guichet_env();

        assert!(matches!(
            result,
            Err(LoadError::InvalidValue {
                key: "GUICHET_TIMEOUT_SECS",
                ..
            })
        ));
    }

    #[test]
    fn invalid_xdg_toml_is_a_parse_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_guichet_env();
        let xdg = tempfile::tempdir().unwrap();
        let app_dir = xdg.path().join("guichet");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), "invalid [[[\n").unwrap();
        let empty = tempfile::tempdir().unwrap();

        let prev_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", xdg.path());
        let result = Settings::load(Some(empty.path()));
        match prev_xdg {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }

    #[test]
    fn no_auto_start_accepts_truthy_spellings() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_guichet_env();
        let empty = tempfile::tempdir().unwrap();
        for (raw, expected) in [("1", true), ("true", true), ("yes", true), ("0", false)] {
            env::set_var("GUICHET_NO_AUTO_START", raw);
            let settings = Settings::load(Some(empty.path())).unwrap();
            assert_eq!(settings.no_auto_start, expected, "raw: {raw}");
        }
        clear_guichet_env();
    }
}
