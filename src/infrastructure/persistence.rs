use crate::domain::{DomainError, DomainResult, KeyValueStore};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default store file, created next to wherever the app is launched.
pub const DEFAULT_STORE_FILE: &str = "tuidex-store.json";

/// Disk-backed key-value store: one JSON object file mapping keys to
/// string values, rewritten whole on every write. Last writer wins; there
/// is no cross-process conflict resolution.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, loading any existing contents.
    ///
    /// A missing file means no prior session and yields an empty store; an
    /// unreadable or unparsable file is an error rather than silent data
    /// loss.
    pub fn open(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| DomainError::StorageRead(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(DomainError::StorageRead(format!("{}: {}", path.display(), e)));
            }
        };
        Ok(Self { path, entries })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| DomainError::StorageWrite(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| DomainError::StorageWrite(e.to_string()))
    }
}
