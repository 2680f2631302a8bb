//! Folder registration persisted as a JSON settings file.
//!
//! Holds the root folders the user has added, the piece of state the
//! catalog database does not own. A missing file is a first run, not an
//! error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub path: PathBuf,
    /// Unix timestamp of the most recent scan, if any.
    pub last_scanned: Option<i64>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Register a folder. Returns `false` when it was already registered.
    pub fn add_folder(&mut self, path: PathBuf) -> bool {
        if self.folders.iter().any(|f| f.path == path) {
            return false;
        }
        self.folders.push(FolderEntry {
            path,
            last_scanned: None,
        });
        true
    }

    pub fn mark_scanned(&mut self, path: &Path) {
        let now = chrono::Utc::now().timestamp();
        if let Some(entry) = self.folders.iter_mut().find(|f| f.path == path) {
            entry.last_scanned = Some(now);
        }
    }

    pub fn folder_paths(&self) -> Vec<PathBuf> {
        self.folders.iter().map(|f| f.path.clone()).collect()
    }
}
