use super::errors::DomainResult;
use std::collections::HashMap;

/// Synchronous key-value storage collaborator.
///
/// The task list engine writes its whole serialized state under a single
/// key; last writer wins. Implementations live in the infrastructure layer
/// except for [`MemoryStore`], which backs tests and the default app.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> DomainResult<()>;
}

impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory store with a write counter, so tests can assert exactly when
/// and what the engine persisted.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// Number of `set` calls observed.
    pub writes: usize,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
