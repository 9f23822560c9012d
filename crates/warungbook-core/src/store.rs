//! Entry persistence

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::models::Entries;

/// Loads and saves the whole entry snapshot
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Read the current snapshot
    async fn load(&self) -> CoreResult<Entries>;

    /// Replace the stored snapshot
    async fn save(&self, entries: &Entries) -> CoreResult<()>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Snapshot kept in a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EntryStore for JsonFileStore {
    async fn load(&self) -> CoreResult<Entries> {
        if !tokio::fs::try_exists(&self.path).await? {
            log::info!(
                target: "warungbook::store",
                "Entries file {} not found, starting empty",
                self.path.display()
            );
            return Ok(Entries::default());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Entries::default());
        }
        let entries: Entries = serde_json::from_str(&content)?;
        log::debug!(
            target: "warungbook::store",
            "Loaded {} entries from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }

    async fn save(&self, entries: &Entries) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

/// Snapshot held in memory only
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Entries>,
}

impl MemoryStore {
    pub fn new(entries: Entries) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

fn poisoned() -> CoreError {
    CoreError::Store {
        message: "memory store lock poisoned".to_string(),
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn load(&self) -> CoreResult<Entries> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }

    async fn save(&self, entries: &Entries) -> CoreResult<()> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        *guard = entries.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
