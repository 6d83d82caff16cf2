//! Durable token storage.
//!
//! A structured key-value interface: one record per key, each carrying the
//! raw value and the expiry that was active when it was written. Reading a
//! record back performs no freshness check; the caller decides what an
//! expired record means.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record could not be encoded or decoded.
    #[error("record codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// A persisted token record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Raw token string.
    pub value: String,
    /// Expiry recorded when the token was written.
    pub expires_at: DateTime<Utc>,
}

/// Key-value persistence for session tokens.
pub trait TokenStore {
    /// Read the record for `key`, if any. No freshness validation.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<StoredToken>, StorageError>;

    /// Write the record for `key`, overwriting any prior value
    /// unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record cannot be written.
    fn set(&mut self, key: &str, value: &str, expires_at: DateTime<Utc>)
    -> Result<(), StorageError>;

    /// Remove the record for `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if an existing record cannot be removed.
    fn clear(&mut self, key: &str) -> Result<(), StorageError>;
}

/// File-backed store: one JSON file per key under the state directory.
///
/// The directory is created lazily on first write.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<StoredToken>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(
        &mut self,
        key: &str,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let record = StoredToken {
            value: value.to_owned(),
            expires_at,
        };
        fs::write(self.path_for(key), serde_json::to_string_pretty(&record)?)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store with a shareable handle.
///
/// Clones share the same records, which lets tests keep a handle on the
/// storage a session store writes through.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    records: Arc<Mutex<HashMap<String, StoredToken>>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<StoredToken>, StorageError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(key).cloned())
    }

    fn set(
        &mut self,
        key: &str,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.insert(
            key.to_owned(),
            StoredToken {
                value: value.to_owned(),
                expires_at,
            },
        );
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileTokenStore::new(dir.path().join("state"));

        assert_eq!(store.get("hexToken").unwrap(), None);

        store.set("hexToken", "tok-1", expiry()).unwrap();
        let record = store.get("hexToken").unwrap().unwrap();
        assert_eq!(record.value, "tok-1");
        assert_eq!(record.expires_at, expiry());

        // Overwrite is unconditional
        store.set("hexToken", "tok-2", expiry()).unwrap();
        assert_eq!(store.get("hexToken").unwrap().unwrap().value, "tok-2");

        store.clear("hexToken").unwrap();
        assert_eq!(store.get("hexToken").unwrap(), None);
    }

    #[test]
    fn test_file_store_clear_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileTokenStore::new(dir.path().to_path_buf());
        assert!(store.clear("hexToken").is_ok());
    }

    #[test]
    fn test_file_store_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hexToken.json"), "not json").unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());
        assert!(matches!(
            store.get("hexToken"),
            Err(StorageError::Codec(_))
        ));
    }

    #[test]
    fn test_memory_store_clones_share_records() {
        let mut store = MemoryTokenStore::new();
        let handle = store.clone();

        store.set("hexToken", "tok", expiry()).unwrap();
        assert_eq!(handle.get("hexToken").unwrap().unwrap().value, "tok");
    }
}
