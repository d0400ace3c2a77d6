use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Vault IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No note at {0}")]
    NotFound(String),
    #[error("{0} is not a note")]
    NotANote(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Note,
    Folder,
}

/// Document access collaborator. Notes are addressed by vault-relative
/// paths; content is whole-file UTF-8 text, read and rewritten in place.
/// Last write wins — there is no locking or versioning.
pub trait Vault {
    /// Look up a path without reading it.
    fn resolve(&self, path: &str) -> Option<EntryKind>;
    fn read(&self, path: &str) -> Result<String, VaultError>;
    fn write(&mut self, path: &str, content: &str) -> Result<(), VaultError>;
    /// Create a note with initial content. Errors if something already
    /// exists at the path.
    fn create(&mut self, path: &str, content: &str) -> Result<(), VaultError>;
}

/// Filesystem-backed vault rooted at a directory.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsVault { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn abs(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Vault for FsVault {
    fn resolve(&self, path: &str) -> Option<EntryKind> {
        let abs = self.abs(path);
        if abs.is_file() {
            Some(EntryKind::Note)
        } else if abs.is_dir() {
            Some(EntryKind::Folder)
        } else {
            None
        }
    }

    fn read(&self, path: &str) -> Result<String, VaultError> {
        let abs = self.abs(path);
        if !abs.exists() {
            return Err(VaultError::NotFound(path.to_string()));
        }
        if !abs.is_file() {
            return Err(VaultError::NotANote(path.to_string()));
        }
        Ok(fs::read_to_string(&abs)?)
    }

    fn write(&mut self, path: &str, content: &str) -> Result<(), VaultError> {
        let abs = self.abs(path);
        if abs.is_dir() {
            return Err(VaultError::NotANote(path.to_string()));
        }
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&abs, content)?;
        Ok(())
    }

    fn create(&mut self, path: &str, content: &str) -> Result<(), VaultError> {
        let abs = self.abs(path);
        if abs.exists() {
            return Err(VaultError::NotANote(path.to_string()));
        }
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&abs, content)?;
        Ok(())
    }
}
