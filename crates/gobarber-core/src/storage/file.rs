//! File-backed key-value store.
//!
//! All entries live in a single JSON document:
//!
//! ```text
//! {
//!   "entries": { "@GoBarber:token": "...", "@GoBarber:user": "{...}" },
//!   "updated_at": "2026-01-01T12:00:00Z"
//! }
//! ```
//!
//! Writes go to a temp file that is renamed over the document, so a crash
//! mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

/// Storage file name inside the data directory
const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageDocument {
    #[serde(default)]
    entries: BTreeMap<String, String>,
    updated_at: Option<DateTime<Utc>>,
}

pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the document
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or prepare) the store inside `dir`, creating the directory if needed.
    pub fn new(dir: &Path) -> Result<Self, StorageError> {
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| StorageError::directory_creation(dir, e))?;
        }
        Ok(Self {
            path: dir.join(STORAGE_FILE),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    async fn read_document(&self) -> Result<StorageDocument, StorageError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StorageDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Like `read_document`, but a corrupt document is moved aside and
    /// replaced by an empty one so writes can recover the store.
    async fn read_document_for_update(&self) -> Result<StorageDocument, StorageError> {
        match self.read_document().await {
            Err(StorageError::Corrupt(e)) => {
                let aside = self.corrupt_path();
                warn!(path = ?self.path, error = %e, "Storage document is corrupt, starting fresh");
                fs::rename(&self.path, &aside).await?;
                Ok(StorageDocument::default())
            }
            other => other,
        }
    }

    fn corrupt_path(&self) -> PathBuf {
        self.path.with_extension("json.corrupt")
    }

    async fn write_document(&self, mut doc: StorageDocument) -> Result<(), StorageError> {
        doc.updated_at = Some(Utc::now());
        let contents = serde_json::to_string_pretty(&doc)?;
        let temp = self.temp_path();
        fs::write(&temp, contents).await?;
        fs::rename(&temp, &self.path).await?;
        debug!(path = ?self.path, entries = doc.entries.len(), "Storage document written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        let doc = self.read_document().await?;
        Ok(keys.iter().map(|k| doc.entries.get(*k).cloned()).collect())
    }

    async fn multi_set(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document_for_update().await?;
        for (key, value) in entries {
            doc.entries.insert((*key).to_string(), (*value).to_string());
        }
        self.write_document(doc).await
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document_for_update().await?;
        let before = doc.entries.len();
        for key in keys {
            doc.entries.remove(*key);
        }
        if doc.entries.len() == before && !self.path.exists() {
            // Nothing stored yet, nothing to remove
            return Ok(());
        }
        self.write_document(doc).await
    }
}
