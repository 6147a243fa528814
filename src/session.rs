//! Persistent bearer-token storage.
//!
//! The token lives under a single fixed key in a small JSON key-value file.
//! Absence of the key means the client is logged out.

use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};
use tokio::{fs, sync::Mutex};
use tracing::error;

pub const SESSION_KEY: &str = "access_token";

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self) -> Option<String>;
    async fn set(&self, token: &str);
    async fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    async fn set(&self, token: &str) {
        *self.token.lock().await = Some(token.to_string());
    }

    async fn clear(&self) {
        *self.token.lock().await = None;
    }
}

/// Write-through store backed by a JSON object on disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileSessionStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    async fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>) + Send) {
        let mut entries = self.entries.lock().await;
        apply(&mut entries);
        if let Err(err) = persist_entries(&self.path, &entries).await {
            error!("failed to write session file {}: {err}", self.path.display());
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> Option<String> {
        self.entries.lock().await.get(SESSION_KEY).cloned()
    }

    async fn set(&self, token: &str) {
        self.update(|entries| {
            entries.insert(SESSION_KEY.to_string(), token.to_string());
        })
        .await;
    }

    async fn clear(&self) {
        self.update(|entries| {
            entries.remove(SESSION_KEY);
        })
        .await;
    }
}

async fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse session file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read session file: {err}");
            BTreeMap::new()
        }
    }
}

async fn persist_entries(path: &Path, entries: &BTreeMap<String, String>) -> io::Result<()> {
    let payload = serde_json::to_vec_pretty(entries)?;
    fs::write(path, payload).await
}
