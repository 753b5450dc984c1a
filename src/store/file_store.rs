//! File System Item Store
//!
//! Default implementation storing one JSON document per item on the local filesystem.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use super::traits::{ItemStore, StoreError, StoreResult};
use crate::model::{Item, ItemUpdate};

/// File system item store
///
/// Each item lives in `<base_path>/<sha256(id)>.json`. The file name has a fixed length whatever
/// the id, cannot name a path outside the base directory, and does not depend on the case
/// sensitivity of the filesystem. The real id is kept inside the document.
pub struct FileItemStore {
    base_path: PathBuf,
    // Serializes writers within this process; read-modify-write primitives rely on it.
    write_lock: Mutex<()>,
}

impl FileItemStore {
    /// Create a new file item store
    ///
    /// # Arguments
    /// * `base_path` - Directory holding the item documents
    pub fn new<P: AsRef<Path>>(base_path: P) -> StoreResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();

        // Create base directory if it doesn't exist (synchronously for constructor)
        std::fs::create_dir_all(&base_path)?;

        Ok(Self {
            base_path,
            write_lock: Mutex::new(()),
        })
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert a key to a full file path
    fn key_to_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.base_path.join(format!("{:x}.json", digest))
    }

    async fn read_item(&self, key: &str, path: &Path) -> StoreResult<Option<Item>> {
        let data = match fs::read(path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let item: Item = serde_json::from_slice(&data)
            .map_err(|e| StoreError::Deserialization(e.to_string()))?;

        if item.id != key {
            warn!(key, stored_id = %item.id, path = %path.display(), "document id does not match key");
            return Ok(None);
        }

        Ok(Some(item))
    }

    async fn write_item(&self, path: &Path, item: &Item) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(item)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        // Write atomically using temp file + rename pattern
        let temp_path = self
            .base_path
            .join(format!(".{}.tmp", Uuid::new_v4()));

        let mut file = fs::File::create(&temp_path).await?;
        let written = async {
            file.write_all(&json).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp_path, path).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait]
impl ItemStore for FileItemStore {
    fn backend_type(&self) -> &'static str {
        "file"
    }

    async fn is_available(&self) -> bool {
        fs::metadata(&self.base_path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    async fn put(&self, item: &Item) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_item(&self.key_to_path(&item.id), item).await
    }

    async fn put_if_absent(&self, item: &Item) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let path = self.key_to_path(&item.id);

        if fs::try_exists(&path).await? {
            return Ok(false);
        }

        self.write_item(&path, item).await?;
        Ok(true)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Item>> {
        self.read_item(key, &self.key_to_path(key)).await
    }

    async fn update(&self, key: &str, changes: &ItemUpdate) -> StoreResult<Option<Item>> {
        let _guard = self.write_lock.lock().await;
        let path = self.key_to_path(key);

        let mut item = match self.read_item(key, &path).await? {
            Some(item) => item,
            None => return Ok(None),
        };

        item.apply(changes);
        self.write_item(&path, &item).await?;
        Ok(Some(item))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        match fs::remove_file(self.key_to_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()), // Idempotent delete
            Err(e) => Err(e.into()),
        }
    }
}
