//! Raw key-value backends.
//!
//! A backend stores one serialized string per key. `FileBackend` keeps one
//! `<key>.json` file per key in the data directory; `MemoryBackend` is used in
//! tests.

#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;

/// Default storage quota across all keys (5 MiB, the usual browser limit).
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Errors raised by a backend. Never reach the stores' callers; see `UserStorage`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded: writing {key} needs {needed} bytes, quota is {quota}")]
    QuotaExceeded { key: String, needed: u64, quota: u64 },

    #[error("failed to serialize value for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("corrupt value stored under {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Minimal string key-value contract shared by all backends.
pub trait KeyValueBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-per-key backend rooted at a data directory.
pub struct FileBackend {
    dir: PathBuf,
    quota_bytes: u64,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>, quota_bytes: u64) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir, quota_bytes })
    }

    /// Path of the file backing `key`. Keys embed user ids, so they are
    /// percent-encoded to keep them inside the data directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
        self.dir.join(format!("{}.json", encoded))
    }

    /// Bytes used by every stored key except `exclude`.
    fn used_bytes_excluding(&self, exclude: &Path) -> Result<u64, StorageError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut total = 0u64;
        for entry in entries.flatten() {
            let path = entry.path();
            if path == exclude || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Ok(meta) = entry.metadata() {
                total = total.saturating_add(meta.len());
            }
        }
        Ok(total)
    }
}

impl KeyValueBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::Io { path, source })
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let needed = self
            .used_bytes_excluding(&path)?
            .saturating_add(value.len() as u64);
        if needed > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                needed,
                quota: self.quota_bytes,
            });
        }

        // Write to a sibling temp file first so a crash never leaves half a list.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|source| StorageError::Io { path, source })?;
        }
        Ok(())
    }
}

/// In-process backend with the same quota semantics as `FileBackend`.
#[cfg(test)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: u64,
}

#[cfg(test)]
impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes,
        }
    }

    /// Store a raw value, bypassing serialization and the quota.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl KeyValueBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.lock();
        let used: u64 = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len() as u64)
            .sum();
        let needed = used.saturating_add(value.len() as u64);
        if needed > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                needed,
                quota: self.quota_bytes,
            });
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_read_write_remove() {
        let tmp = TempDir::new().unwrap();
        let backend = FileBackend::new(tmp.path(), DEFAULT_QUOTA_BYTES).unwrap();

        assert!(backend.read("ingredients_u1").unwrap().is_none());

        backend.write("ingredients_u1", "[]").unwrap();
        assert_eq!(backend.read("ingredients_u1").unwrap().as_deref(), Some("[]"));
        assert!(backend.path_for("ingredients_u1").exists());

        backend.remove("ingredients_u1").unwrap();
        assert!(backend.read("ingredients_u1").unwrap().is_none());
        // Removing a missing key is fine
        backend.remove("ingredients_u1").unwrap();
    }

    #[test]
    fn test_file_backend_keys_stay_inside_dir() {
        let tmp = TempDir::new().unwrap();
        let backend = FileBackend::new(tmp.path(), DEFAULT_QUOTA_BYTES).unwrap();

        let path = backend.path_for("ingredients_../../etc/passwd");
        assert_eq!(path.parent().unwrap(), tmp.path());
    }

    #[test]
    fn test_file_backend_quota() {
        let tmp = TempDir::new().unwrap();
        let backend = FileBackend::new(tmp.path(), 10).unwrap();

        backend.write("a", "12345").unwrap();
        // Overwriting the same key only counts the new value
        backend.write("a", "1234567890").unwrap();

        let err = backend.write("b", "1").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert!(backend.read("b").unwrap().is_none());
    }

    #[test]
    fn test_memory_backend_quota() {
        let backend = MemoryBackend::with_quota(4);
        backend.write("k", "abcd").unwrap();
        assert!(matches!(
            backend.write("other", "x"),
            Err(StorageError::QuotaExceeded { .. })
        ));
        backend.remove("k").unwrap();
        backend.write("other", "x").unwrap();
    }
}
