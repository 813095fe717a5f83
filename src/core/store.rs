//! Checkpoint store: a durable key-addressed byte mapping.
//!
//! The store is agnostic to the record schema; it moves opaque byte
//! sequences associated with resolved session keys. Only `put` creates
//! namespace entries. `get` and `delete` on an absent key fail with
//! `NotFound` -- idempotent delete is enforced one level up, by the reader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::BatonError;
use crate::core::session::{self, SessionKey};

pub trait CheckpointStore {
    /// Persist `bytes` under `key`, creating the enclosing namespace if
    /// absent and replacing any existing record (last-write-wins). Returns
    /// the storage address written.
    fn put(&self, key: &SessionKey, bytes: &[u8]) -> Result<PathBuf, BatonError>;

    fn get(&self, key: &SessionKey) -> Result<Vec<u8>, BatonError>;

    fn exists(&self, key: &SessionKey) -> bool;

    fn delete(&self, key: &SessionKey) -> Result<(), BatonError>;

    /// Storage address a key resolves to, for reporting.
    fn address(&self, key: &SessionKey) -> PathBuf;
}

/// File-per-key store rooted at the checkpoint namespace directory.
///
/// `put` writes to a sibling temporary file and renames it over the
/// destination, so an interrupted write leaves any prior record intact on
/// the same filesystem.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate the session keys with a record on disk: the default slot
    /// first, then named sessions in filename order.
    pub fn list_keys(&self) -> Result<Vec<SessionKey>, BatonError> {
        let mut keys = Vec::new();
        if self.root.join(session::DEFAULT_HANDOFF_FILE).exists() {
            keys.push(SessionKey::Default);
        }

        let named_dir = self.root.join(session::NAMED_HANDOFF_DIR);
        if !named_dir.exists() {
            return Ok(keys);
        }
        let mut names = Vec::new();
        let entries =
            fs::read_dir(&named_dir).map_err(|e| BatonError::storage_read(&named_dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| BatonError::storage_read(&named_dir, e))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name
                .strip_prefix("handoff-")
                .and_then(|rest| rest.strip_suffix(".json"))
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        keys.extend(names.into_iter().map(SessionKey::Named));
        Ok(keys)
    }
}

impl CheckpointStore for FileStore {
    fn put(&self, key: &SessionKey, bytes: &[u8]) -> Result<PathBuf, BatonError> {
        let path = self.address(key);
        let parent = path
            .parent()
            .ok_or_else(|| BatonError::Validation("invalid storage address".to_string()))?;
        fs::create_dir_all(parent).map_err(|e| BatonError::storage_write(parent, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| BatonError::storage_write(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            BatonError::storage_write(&path, e)
        })?;
        Ok(path)
    }

    fn get(&self, key: &SessionKey) -> Result<Vec<u8>, BatonError> {
        let path = self.address(key);
        if !path.exists() {
            return Err(BatonError::NotFound(format!(
                "no checkpoint record at {}",
                path.display()
            )));
        }
        fs::read(&path).map_err(|e| BatonError::storage_read(&path, e))
    }

    fn exists(&self, key: &SessionKey) -> bool {
        self.address(key).exists()
    }

    fn delete(&self, key: &SessionKey) -> Result<(), BatonError> {
        let path = self.address(key);
        if !path.exists() {
            return Err(BatonError::NotFound(format!(
                "no checkpoint record at {}",
                path.display()
            )));
        }
        fs::remove_file(&path).map_err(|e| BatonError::storage_write(&path, e))
    }

    fn address(&self, key: &SessionKey) -> PathBuf {
        key.address(&self.root)
    }
}
