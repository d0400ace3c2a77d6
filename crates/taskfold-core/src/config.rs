use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document-extension suffix appended when resolving logical note names.
pub const NOTE_SUFFIX: &str = ".md";

pub const SETTINGS_FILENAME: &str = ".taskfold.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Settings IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Vault-level settings. Paths are suffix-free logical names; the `.md`
/// suffix is appended on resolution. Loaded once per operation and treated
/// as immutable while an engine runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_archive_path")]
    pub archive_path: String,
    /// Scope for the archival engine; empty watches every note.
    #[serde(default = "default_todo_path")]
    pub todo_path: String,
    #[serde(default = "default_with_timestamp")]
    pub with_timestamp: bool,
    /// Ledger note for recurring-task totals; empty disables aggregation.
    #[serde(default = "default_recurring_task_path")]
    pub recurring_task_path: String,
}

fn default_archive_path() -> String {
    "Archive".to_string()
}

fn default_todo_path() -> String {
    "Todo".to_string()
}

fn default_with_timestamp() -> bool {
    true
}

fn default_recurring_task_path() -> String {
    "Tasks".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            archive_path: default_archive_path(),
            todo_path: default_todo_path(),
            with_timestamp: default_with_timestamp(),
            recurring_task_path: default_recurring_task_path(),
        }
    }
}

impl Settings {
    pub fn archive_note(&self) -> String {
        format!("{}{NOTE_SUFFIX}", self.archive_path)
    }

    pub fn todo_note(&self) -> String {
        format!("{}{NOTE_SUFFIX}", self.todo_path)
    }

    /// `None` when no ledger is configured (the aggregation engine fails
    /// soft in that case).
    pub fn ledger_note(&self) -> Option<String> {
        if self.recurring_task_path.trim().is_empty() {
            return None;
        }
        Some(format!("{}{NOTE_SUFFIX}", self.recurring_task_path))
    }

    /// Whether a changed note falls inside the archival engine's watch
    /// scope. An empty todo path means every note is watched.
    pub fn in_todo_scope(&self, path: &str) -> bool {
        self.todo_path.is_empty() || self.todo_note() == path
    }
}

pub fn settings_path(vault_root: &Path) -> PathBuf {
    vault_root.join(SETTINGS_FILENAME)
}

/// Load settings from the vault root, falling back to defaults when the
/// settings file is absent or unreadable.
pub fn load_settings(vault_root: &Path) -> Settings {
    let path = settings_path(vault_root);
    if !path.is_file() {
        return Settings::default();
    }
    fs::read_to_string(&path)
        .ok()
        .and_then(|text| toml::from_str::<Settings>(&text).ok())
        .unwrap_or_default()
}

pub fn save_settings(vault_root: &Path, settings: &Settings) -> Result<PathBuf, ConfigError> {
    let path = settings_path(vault_root);
    let body = toml::to_string_pretty(settings)?;
    fs::write(&path, body)?;
    Ok(path)
}
