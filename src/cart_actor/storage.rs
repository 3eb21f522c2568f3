//! Key/value backends holding the serialized cart.
//!
//! The cart actor is the only reader and writer of its key, so backends need no
//! cross-process coordination. Values are opaque strings (JSON in practice).

use super::error::CartError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::debug;

#[async_trait]
pub trait CartStorage: Send + Sync + 'static {
    async fn load(&self, key: &str) -> Result<Option<String>, CartError>;
    async fn save(&self, key: &str, value: &str) -> Result<(), CartError>;
    async fn remove(&self, key: &str) -> Result<(), CartError>;
}

/// Process-local storage. Can be told to fail reads or writes, to exercise the cart's
/// load and persist-before-commit paths.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, e.g. a corrupt record.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.entries_mut().insert(key.to_string(), value.to_string());
        storage
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw stored value.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries_mut().get(key).cloned()
    }

    fn entries_mut(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_writable(&self) -> Result<(), CartError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CartError::Storage("storage is read-only".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, CartError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CartError::Storage("storage is unreadable".into()));
        }
        Ok(self.raw(key))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), CartError> {
        self.check_writable()?;
        self.entries_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CartError> {
        self.check_writable()?;
        self.entries_mut().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a crash
/// mid-write leaves the previous value intact.
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl CartStorage for JsonFileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, CartError> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), CartError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(path = %path.display(), bytes = value.len(), "Cart written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CartError> {
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.load("shopping_cart").await.unwrap(), None);
        storage.save("shopping_cart", "[]").await.unwrap();
        assert_eq!(storage.load("shopping_cart").await.unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("nested/shopping_cart.json.tmp").exists());

        storage.remove("shopping_cart").await.unwrap();
        storage.remove("shopping_cart").await.unwrap();
        assert_eq!(storage.load("shopping_cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_storage_can_refuse_writes() {
        let storage = MemoryStorage::with_entry("k", "v");
        storage.set_fail_writes(true);
        assert!(matches!(storage.save("k", "w").await, Err(CartError::Storage(_))));
        assert!(storage.remove("k").await.is_err());
        assert_eq!(storage.raw("k").as_deref(), Some("v"));
    }
}
