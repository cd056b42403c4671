//! Single-document JSON file backend for dashboard state.
//!
//! Implements the [`KeyedStore`] contract by keeping every key in one JSON
//! object, mirrored between memory and a file on disk. Reads come from
//! memory; every mutation rewrites the whole document through a temp file
//! plus rename, so a crash mid-write leaves either the old document or the
//! new one, never a torn file.
//!
//! The store assumes it is the only writer of its file (one desktop app,
//! one state file). A document that fails to parse on open is treated as
//! lost state: the store starts empty and the next write replaces it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::warn;

use september_core::error::StoreError;
use september_core::system::KeyedStore;

/// Directory under the user config dir holding the default state file.
const APP_DIR: &str = "september";
/// Default state file name.
const STATE_FILE: &str = "state.json";

/// File-backed [`KeyedStore`]: all keys in one JSON object document.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`, reading any existing document.
    ///
    /// A missing file yields an empty store. A file that is not a JSON
    /// object also yields an empty store (logged); the next write replaces
    /// it. Only an unreadable file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    warn!(path = %path.display(), "state file is not a JSON object; starting empty");
                    Map::new()
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "state file is malformed; starting empty");
                    Map::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    /// Open the store at its default location,
    /// `<config_dir>/september/state.json`.
    pub fn open_default() -> Result<Self, StoreError> {
        let base = dirs::config_dir()
            .ok_or_else(|| StoreError::Backend("no user config directory".to_string()))?;
        Self::open(base.join(APP_DIR).join(STATE_FILE))
    }

    /// Where this store persists its document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the on-disk document: temp file in the same directory, then
    /// rename over the target.
    async fn persist(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        let doc = serde_json::to_vec_pretty(entries)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &doc).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyedStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value);
        self.persist(&entries).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.clear();
        self.persist(&entries).await
    }
}
