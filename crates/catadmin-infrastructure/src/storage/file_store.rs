//! JSON-file key-value storage with atomic writes.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use catadmin_core::error::{AdminError, Result};
use catadmin_core::storage::KeyValueStore;
use tracing::{debug, warn};

/// Stores keys as one flat JSON object in a file.
///
/// Every mutation rewrites the whole file through a temporary file and an
/// atomic rename, so a crash never leaves a half-written session behind. A
/// process-local mutex serialises writers sharing one instance.
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole map. A missing or blank file is an empty map.
    ///
    /// An unparseable file also reads as empty; the flag tells [`update`]
    /// to rewrite it on the next mutation.
    ///
    /// [`update`]: Self::update
    fn load(&self) -> Result<(BTreeMap<String, String>, bool)> {
        if !self.path.exists() {
            return Ok((BTreeMap::new(), false));
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok((BTreeMap::new(), false));
        }
        match serde_json::from_str(&content) {
            Ok(entries) => Ok((entries, false)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable session storage");
                Ok((BTreeMap::new(), true))
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        restrict_permissions(&tmp_file)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), keys = entries.len(), "Session storage written");
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| AdminError::storage(format!("Invalid storage path: {}", self.path.display())))?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        Ok(self.path.with_file_name(tmp_name))
    }

    fn update<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AdminError::storage("storage lock poisoned"))?;
        let (mut entries, corrupt) = self.load()?;
        if mutate(&mut entries) || corrupt {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> Result<()> {
    Ok(())
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.0.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| entries.remove(key).is_some())
    }
}
