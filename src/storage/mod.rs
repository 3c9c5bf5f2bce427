use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Key under which the bearer token is persisted
pub const TOKEN_KEY: &str = "auth_token";
/// Key under which the serialized current user is persisted
pub const USER_KEY: &str = "user";

const STORAGE_FILE_NAME: &str = "storage.json";
const STAGING_FILE_NAME: &str = "storage.json.tmp";

/// Persistent client-side key/value storage
///
/// Holds the session token and the cached user record between runs.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Read a value, `None` when the key was never set
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a single key
    async fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key
    async fn clear(&self) -> Result<()>;
}

/// In-process storage, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ClientStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries().clear();
        Ok(())
    }
}

/// Storage backed by a single JSON object file
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file
    lock: tokio::sync::Mutex<()>,
}

impl FileStorage {
    /// Use `storage.json` inside `dir`; the directory is created on first write
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORAGE_FILE_NAME),
            lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt storage file {}", self.path.display()))
    }

    /// Like `load`, but an unreadable file starts over as an empty map
    async fn load_for_update(&self) -> Result<Map<String, Value>> {
        match self.load().await {
            Ok(entries) => Ok(entries),
            Err(e) if e.downcast_ref::<serde_json::Error>().is_some() => {
                warn!("Resetting {}: {:#}", self.path.display(), e);
                Ok(Map::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Write through a staging file renamed over the real one, so readers
    /// see either the old map or the new one
    async fn save(&self, entries: &Map<String, Value>) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            restrict_permissions(dir, 0o700).await;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let staging = dir.join(STAGING_FILE_NAME);
        match tokio::fs::remove_file(&staging).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                return Err(e).with_context(|| format!("Failed to delete {}", staging.display()))
            }
            _ => {}
        }

        let mut file = private_file(&staging)
            .await
            .with_context(|| format!("Failed to create {}", staging.display()))?;
        file.write_all(json.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved {} storage keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ClientStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let entries = self.load().await?;
        Ok(entries.get(key).and_then(Value::as_str).map(str::to_string))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load_for_update().await?;
        entries.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = match self.load().await {
            Ok(entries) => entries,
            Err(e) if e.downcast_ref::<serde_json::Error>().is_some() => {
                warn!("Discarding unreadable {}: {:#}", self.path.display(), e);
                return remove_if_present(&self.path).await;
            }
            Err(e) => return Err(e),
        };
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        remove_if_present(&self.path).await
    }
}

async fn remove_if_present(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to delete {}", path.display())),
    }
}

#[cfg(unix)]
async fn private_file(path: &Path) -> std::io::Result<tokio::fs::File> {
    tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
        .await
}

#[cfg(not(unix))]
async fn private_file(path: &Path) -> std::io::Result<tokio::fs::File> {
    tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await {
        warn!("Failed to chmod {:o} {}: {}", mode, path.display(), e);
    }
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path, _mode: u32) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);

        storage.set(TOKEN_KEY, "abc").await.unwrap();
        storage.set(USER_KEY, "{}").await.unwrap();
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));

        storage.remove(TOKEN_KEY).await.unwrap();
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
        assert_eq!(storage.get(USER_KEY).await.unwrap().as_deref(), Some("{}"));

        storage.clear().await.unwrap();
        assert_eq!(storage.get(USER_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_storage_survives_reopen() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let dir = tmp.path().join("nested");

        let storage = FileStorage::new(&dir);
        storage.set(TOKEN_KEY, "token-1").await.unwrap();
        storage.set(USER_KEY, r#"{"id":"u1"}"#).await.unwrap();

        let reopened = FileStorage::new(&dir);
        assert_eq!(reopened.get(TOKEN_KEY).await.unwrap().as_deref(), Some("token-1"));
        assert_eq!(
            reopened.get(USER_KEY).await.unwrap().as_deref(),
            Some(r#"{"id":"u1"}"#)
        );
    }

    #[tokio::test]
    async fn file_storage_remove_and_clear() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path());

        storage.set(TOKEN_KEY, "t").await.unwrap();
        storage.set(USER_KEY, "u").await.unwrap();
        storage.remove(TOKEN_KEY).await.unwrap();
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
        assert_eq!(storage.get(USER_KEY).await.unwrap().as_deref(), Some("u"));

        storage.clear().await.unwrap();
        assert!(!storage.path().exists());
        assert_eq!(storage.get(USER_KEY).await.unwrap(), None);

        // clearing twice is fine
        storage.clear().await.unwrap();
    }

    #[tokio::test]
    async fn file_storage_rejects_corrupt_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path());
        std::fs::write(storage.path(), "not json").unwrap();

        assert!(storage.get(TOKEN_KEY).await.is_err());
    }

    #[tokio::test]
    async fn file_storage_recovers_from_truncated_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path());
        std::fs::write(storage.path(), r#"{"auth_token": "t0", "us"#).unwrap();

        storage.remove(TOKEN_KEY).await.unwrap();
        assert!(!storage.path().exists());

        std::fs::write(storage.path(), r#"{"auth_token": "t0", "us"#).unwrap();
        storage.set(TOKEN_KEY, "t1").await.unwrap();
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap().as_deref(), Some("t1"));
        assert_eq!(storage.get(USER_KEY).await.unwrap(), None);
        assert!(!tmp.path().join(STAGING_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn file_storage_replaces_leftover_staging_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path());
        std::fs::write(tmp.path().join(STAGING_FILE_NAME), "half").unwrap();

        storage.set(TOKEN_KEY, "t").await.unwrap();
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap().as_deref(), Some("t"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_storage_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path());
        storage.set(TOKEN_KEY, "secret").await.unwrap();

        let mode = std::fs::metadata(storage.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
