use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{SessionStore, StoreError};

pub const SESSION_FILE: &str = "session.json";

/// On-disk shape of the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDocument {
    pub entries: BTreeMap<String, String>,
    pub updated_at: DateTime<Utc>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }
}

/// JSON file store. The document is re-read on every call, so a logout
/// performed by another process is visible to the next query here.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `session.json` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<StoreDocument, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreDocument::default()),
            Err(e) => return Err(e.into()),
        };

        let document: StoreDocument = serde_json::from_str(&content)?;
        Ok(document)
    }

    fn save(&self, mut document: StoreDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        document.updated_at = Utc::now();
        let content = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, content)?;
        tracing::debug!("Wrote {} entries to {}", document.entries.len(), self.path.display());
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut document = self.load()?;
        document.entries.insert(key.to_string(), value.to_string());
        self.save(document)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut document = self.load()?;
        if document.entries.remove(key).is_some() {
            self.save(document)?;
        }
        Ok(())
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
