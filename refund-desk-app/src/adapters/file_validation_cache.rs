//! File-backed `ValidationCache`.
//!
//! One JSON document per key, e.g. `iban-validation_<hash>.json` containing
//! `{"error":null}`. Entries never expire.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use refund_desk_core::error::{CoreError, CoreResult};
use refund_desk_core::traits::ValidationCache;
use refund_desk_core::types::CachedValidation;

/// Validation cache stored as files under a directory.
#[derive(Debug, Clone)]
pub struct FileValidationCache {
    dir: PathBuf,
    /// Sequence for temp file names, shared by clones
    writes: Arc<AtomicU64>,
}

impl FileValidationCache {
    /// Cache rooted at `dir`; the directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            writes: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }

    /// Temp path unique to one write, so concurrent writers never share it.
    fn temp_path(&self, path: &Path) -> PathBuf {
        let seq = self.writes.fetch_add(1, Ordering::Relaxed);
        path.with_extension(format!("json.{}.{seq}.tmp", std::process::id()))
    }
}

#[async_trait]
impl ValidationCache for FileValidationCache {
    async fn get(&self, key: &str) -> CoreResult<Option<CachedValidation>> {
        let path = self.entry_path(key);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CoreError::CacheError(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        serde_json::from_slice(&raw).map(Some).map_err(|e| {
            CoreError::SerializationError(format!("Invalid cache entry {}: {e}", path.display()))
        })
    }

    async fn set(&self, key: &str, value: &CachedValidation) -> CoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            CoreError::CacheError(format!(
                "Failed to create cache directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let json =
            serde_json::to_vec(value).map_err(|e| CoreError::SerializationError(e.to_string()))?;

        // Write then rename: readers never see a partial entry
        let path = self.entry_path(key);
        let tmp_path = self.temp_path(&path);
        tokio::fs::write(&tmp_path, json).await.map_err(|e| {
            CoreError::CacheError(format!("Failed to write {}: {e}", tmp_path.display()))
        })?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(CoreError::CacheError(format!(
                "Failed to write {}: {e}",
                path.display()
            )));
        }
        Ok(())
    }
}
