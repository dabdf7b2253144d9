//! Credential store backed by one JSON file.
//!
//! The whole key map is rewritten through a sibling temp file and renamed
//! into place, so `set_all` and `remove_all` land both keys or neither.
//! A corrupt file reads as an error; writes and clears replace it. A file
//! that cannot be read at all is left alone.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use staffdesk_client::util::storage::{Storage, StorageError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_error(key, &e)),
        }
    }

    fn load(&self, key: &str) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_raw(key)? {
            Some(raw) => serde_json::from_slice(&raw).map_err(|e| read_error(key, &e)),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Starting point for a mutation. A file that does not decode is
    /// discarded; a file that cannot be read is an error.
    fn load_for_write(&self, key: &str) -> Result<BTreeMap<String, String>, StorageError> {
        let Some(raw) = self.read_raw(key)? else {
            return Ok(BTreeMap::new());
        };
        match serde_json::from_slice(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "replacing corrupt credential file");
                Ok(BTreeMap::new())
            }
        }
    }

    fn save(&self, key: &str, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(key, &e))?;
        }
        let rendered = serde_json::to_string_pretty(map).map_err(|e| write_error(key, &e))?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, rendered).map_err(|e| write_error(key, &e))?;
        restrict_permissions(&tmp_path).map_err(|e| write_error(key, &e))?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(write_error(key, &e));
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn read_error(key: &str, e: &impl std::fmt::Display) -> StorageError {
    StorageError::Read { key: key.to_owned(), message: e.to_string() }
}

fn write_error(key: &str, e: &impl std::fmt::Display) -> StorageError {
    StorageError::Write { key: key.to_owned(), message: e.to_string() }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load(key)?.remove(key))
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let Some(&(first, _)) = entries.first() else {
            return Ok(());
        };
        let mut map = self.load_for_write(first)?;
        for &(key, value) in entries {
            map.insert(key.to_owned(), value.to_owned());
        }
        self.save(first, &map)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let Some(&first) = keys.first() else {
            return Ok(());
        };
        if !self.path.exists() {
            return Ok(());
        }
        let mut map = self.load_for_write(first)?;
        for key in keys {
            map.remove(*key);
        }
        if map.is_empty() {
            return fs::remove_file(&self.path).map_err(|e| write_error(first, &e));
        }
        self.save(first, &map)
    }
}
