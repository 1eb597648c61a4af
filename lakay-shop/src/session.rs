//! Session identity
//!
//! Every cart and order request is correlated with server-side state through a
//! per-tab session id. The id is generated once (UUID v4), kept in a
//! [`SessionStorage`] for the tab's lifetime and never mutated.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{ShopError, ShopResult};

/// Storage key holding the session id
pub const SESSION_KEY: &str = "sessionId";

/// Per-tab key/value storage
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> ShopResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ShopResult<()>;
}

/// In-memory storage, cleared when the process (the "tab") ends
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> ShopResult<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ShopResult<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file storage under a work directory
///
/// Lets a shell session keep its cart across restarts of the binary.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub const FILE_NAME: &'static str = "session.json";

    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: work_dir.into().join(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ShopResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let json = fs::read_to_string(&self.path)?;
        serde_json::from_str(&json).map_err(|e| {
            ShopError::Storage(format!("Corrupt session file {}: {}", self.path.display(), e))
        })
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> ShopResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ShopResult<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// Stable session identifier for this tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProvider {
    session_id: Arc<str>,
}

impl SessionProvider {
    /// Recover the stored id, or generate and store a new one
    pub fn load(storage: &dyn SessionStorage) -> ShopResult<Self> {
        if let Some(existing) = storage.get(SESSION_KEY)?.filter(|id| !id.is_empty()) {
            tracing::debug!(session_id = %existing, "Recovered session id");
            return Ok(Self {
                session_id: existing.into(),
            });
        }

        let session_id = Uuid::new_v4().to_string();
        storage.set(SESSION_KEY, &session_id)?;
        tracing::info!(session_id = %session_id, "Created new session id");
        Ok(Self {
            session_id: session_id.into(),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl std::fmt::Display for SessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.session_id)
    }
}
