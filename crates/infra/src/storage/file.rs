//! JSON file store
//!
//! The file holds a flat string map, e.g. `{"apiToken": "..."}`. Writes go
//! to a sibling temp file first and are renamed into place.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gradebook_core::CredentialStore;
use gradebook_domain::StorageError;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::storage_error_from_io;

#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, Value>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(storage_error_from_io(&err)),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|err| {
            StorageError::Corrupt(format!("{} is not a JSON object: {err}", self.path.display()))
        })
    }

    fn write_map(&self, map: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| storage_error_from_io(&err))?;
        }

        let contents = serde_json::to_string_pretty(map)
            .map_err(|err| StorageError::Unavailable(format!("failed to encode store: {err}")))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents).map_err(|err| storage_error_from_io(&err))?;
        fs::rename(&tmp, &self.path).map_err(|err| storage_error_from_io(&err))
    }

    /// Current map plus whether it replaces an unreadable file. A corrupt
    /// file reads as empty so the next write overwrites it.
    fn read_map_for_update(&self) -> Result<(BTreeMap<String, Value>, bool), StorageError> {
        match self.read_map() {
            Ok(map) => Ok((map, false)),
            Err(StorageError::Corrupt(reason)) => {
                warn!(path = %self.path.display(), reason = %reason, "Replacing corrupt credential file");
                Ok((BTreeMap::new(), true))
            }
            Err(err) => Err(err),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock();
        match self.read_map()?.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(StorageError::Corrupt(format!(
                "entry '{key}' is not a string: {other}"
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let (mut map, _) = self.read_map_for_update()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)?;
        debug!(path = %self.path.display(), key = %key, "Credential written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let (mut map, replaced) = self.read_map_for_update()?;
        if map.remove(key).is_none() && !replaced {
            return Ok(());
        }
        if map.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(storage_error_from_io(&err)),
            };
        }
        self.write_map(&map)
    }
}
