//! Session persistence
//!
//! Saves the document as plain text into a single named slot of a
//! session-scoped store, and rebuilds a fresh document from that slot on
//! start-up. The round trip is deliberately lossy: block types and inline
//! styles are not kept.

use crate::config::{SessionConfig, APP_ID};
use crate::document::ContentState;
use crate::editor::EditorState;
use crate::error::{SessionError, SessionResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A string key-value store scoped to one user session
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> SessionResult<()>;
    fn remove_item(&mut self, key: &str) -> SessionResult<()>;
}

/// In-process store, gone when the process exits
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> SessionResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> SessionResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// On-disk layout of a `FileStorage`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    items: HashMap<String, String>,
    updated_at: DateTime<Utc>,
}

/// Store backed by a JSON file, for hosts that outlive a single process
///
/// Every write rewrites the file. The host clears it when the session ends.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Store at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the user's data directory
    pub fn in_data_dir() -> SessionResult<Self> {
        dirs::data_dir()
            .map(|p| Self::new(p.join(APP_ID).join("session-store.json")))
            .ok_or(SessionError::DirectoryError)
    }

    /// Store at the configured path, or in the data directory when unset
    pub fn from_config(config: &SessionConfig) -> SessionResult<Self> {
        match &config.store_path {
            Some(path) => Ok(Self::new(path.clone())),
            None => Self::in_data_dir(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the backing file, ending the session
    pub fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::WriteError {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn load(&self) -> SessionResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|source| SessionError::ReadError {
                path: self.path.clone(),
                source,
            })?;
        let file: StoreFile = serde_json::from_str(&content)?;
        Ok(file.items)
    }

    fn store(&self, items: HashMap<String, String>) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SessionError::WriteError {
                path: self.path.clone(),
                source,
            })?;
        }

        let file = StoreFile {
            items,
            updated_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, content).map_err(|source| SessionError::WriteError {
            path: self.path.clone(),
            source,
        })
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> SessionResult<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.store(items)
    }

    fn remove_item(&mut self, key: &str) -> SessionResult<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.store(items)?;
        }
        Ok(())
    }
}

/// Write the document's plain text into `key`, replacing any earlier save
pub fn save<S: SessionStorage + ?Sized>(
    state: &EditorState,
    storage: &mut S,
    key: &str,
) -> SessionResult<()> {
    let text = state.content().plain_text();
    storage.set_item(key, &text)?;
    log::info!("Saved {} characters to session slot {:?}", text.chars().count(), key);
    Ok(())
}

/// Build a fresh state from a saved snapshot, or an empty one without it
pub fn restore(raw: Option<&str>) -> EditorState {
    match raw {
        Some(text) if !text.is_empty() => {
            EditorState::create_with_content(ContentState::from_plain_text(text))
        }
        _ => EditorState::create_empty(),
    }
}

/// Restore from the slot `key`
///
/// A store that cannot be read is treated like a missing snapshot.
pub fn restore_from<S: SessionStorage + ?Sized>(storage: &S, key: &str) -> EditorState {
    match storage.get_item(key) {
        Ok(Some(text)) => {
            log::info!("Restoring session slot {:?}", key);
            restore(Some(&text))
        }
        Ok(None) => {
            log::debug!("No saved text in session slot {:?}", key);
            restore(None)
        }
        Err(e) => {
            log::warn!("Failed to read session slot {:?}, starting empty: {}", key, e);
            restore(None)
        }
    }
}

/// Save into the configured slot
pub fn save_session<S: SessionStorage + ?Sized>(
    state: &EditorState,
    storage: &mut S,
    config: &SessionConfig,
) -> SessionResult<()> {
    save(state, storage, &config.storage_key)
}

/// Restore from the configured slot
pub fn restore_session<S: SessionStorage + ?Sized>(
    storage: &S,
    config: &SessionConfig,
) -> EditorState {
    restore_from(storage, &config.storage_key)
}
