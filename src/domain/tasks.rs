//! The task list engine.
//!
//! Owns the ordered task sequence and mirrors it to the injected storage
//! collaborator after every mutation. Persistence is guarded by a one-way
//! `Uninitialized -> Loaded` transition: until [`TaskList::hydrate`] has
//! run, every mutator stays callable but no write reaches the store, so an
//! early mutation can never clobber a previous session's data.

use super::errors::{DomainError, DomainResult};
use super::models::Task;
use super::storage::KeyValueStore;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// The single storage key holding the whole serialized task list.
pub const TASKS_KEY: &str = "tuidex-tasks";

/// Ordered task sequence plus the load/persist guard.
///
/// The array position of a task defines both render order and persisted
/// order. The storage collaborator is injected at construction so tests
/// can substitute an in-memory fake.
pub struct TaskList<S: KeyValueStore = Box<dyn KeyValueStore>> {
    tasks: Vec<Task>,
    loaded: bool,
    next_seq: u64,
    store: S,
}

impl<S: KeyValueStore> fmt::Debug for TaskList<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskList")
            .field("tasks", &self.tasks)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> TaskList<S> {
    pub fn new(store: S) -> Self {
        Self {
            tasks: Vec::new(),
            loaded: false,
            next_seq: 0,
            store,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether the one-time load from storage has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// One-time load of the persisted representation.
    ///
    /// `None` means no prior session. Ids are normalized to strings during
    /// deserialization (older sessions stored them as numbers), and tasks
    /// from before the separate `created_at` field get their timestamp
    /// backfilled from the id. Unparsable data is treated as an absent
    /// session but reported, so the caller can surface it instead of
    /// silently starting empty.
    ///
    /// After this call the engine is loaded unconditionally and writes are
    /// unlocked, whether or not stored data existed or parsed.
    pub fn hydrate(&mut self, stored: Option<&str>) -> DomainResult<()> {
        let result = match stored {
            None => Ok(()),
            Some(raw) => match serde_json::from_str::<Vec<Task>>(raw) {
                Ok(mut tasks) => {
                    for task in &mut tasks {
                        if task.created_at == 0 {
                            if let Some(millis) = task.id_millis() {
                                task.created_at = millis;
                            }
                        }
                    }
                    self.tasks = tasks;
                    Ok(())
                }
                Err(e) => Err(DomainError::MalformedTaskData(e.to_string())),
            },
        };

        self.loaded = true;
        result
    }

    /// Appends a new incomplete task.
    ///
    /// Input that is empty after trimming is rejected and nothing is
    /// stored; otherwise the text is kept verbatim. The id combines a
    /// millisecond stamp with a monotonic counter, so two adds within the
    /// same clock tick cannot collide.
    pub fn add_task(&mut self, text: &str) -> DomainResult<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let now = current_millis();
        self.next_seq += 1;
        self.tasks.push(Task {
            id: format!("{}-{}", now, self.next_seq),
            text: text.to_string(),
            completed: false,
            created_at: now,
        });

        self.persist()
    }

    /// Flips the completion flag of the matching task. Silent no-op if the
    /// id is absent.
    pub fn toggle(&mut self, id: &str) -> DomainResult<()> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.completed = !task.completed;
        self.persist()
    }

    /// Removes the matching task, preserving the relative order of the
    /// rest. Silent no-op if the id is absent.
    pub fn remove(&mut self, id: &str) -> DomainResult<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Moves the task at `source` to `destination`, shifting the elements
    /// between.
    ///
    /// `destination: None` models a drop outside any valid slot and leaves
    /// the state unchanged. Indices outside `[0, len)` are a caller
    /// contract violation.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> DomainResult<()> {
        let Some(destination) = destination else {
            return Ok(());
        };
        let task = self.tasks.remove(source);
        self.tasks.insert(destination, task);
        self.persist()
    }

    /// Writes the full ordered task list to the store under [`TASKS_KEY`].
    ///
    /// Suppressed while the engine is not yet loaded.
    pub fn persist(&mut self) -> DomainResult<()> {
        if !self.loaded {
            return Ok(());
        }
        let json = serde_json::to_string(&self.tasks)
            .map_err(|e| DomainError::StorageWrite(e.to_string()))?;
        self.store.set(TASKS_KEY, &json)
    }
}

fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::MemoryStore;

    fn hydrated() -> TaskList<MemoryStore> {
        let mut engine = TaskList::new(MemoryStore::default());
        engine.hydrate(None).unwrap();
        engine
    }

    fn ids(engine: &TaskList<MemoryStore>) -> Vec<String> {
        engine.tasks().iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_add_task_rejects_empty_input() {
        let mut engine = hydrated();
        engine.add_task("").unwrap();
        engine.add_task("   ").unwrap();
        assert!(engine.is_empty());
        assert_eq!(engine.store().writes, 0);
    }

    #[test]
    fn test_add_task_appends_verbatim_text() {
        let mut engine = hydrated();
        engine.add_task(" buy milk ").unwrap();

        assert_eq!(engine.len(), 1);
        assert_eq!(engine.tasks()[0].text, " buy milk ");
        assert!(!engine.tasks()[0].completed);
    }

    #[test]
    fn test_rapid_adds_get_distinct_ids() {
        let mut engine = hydrated();
        engine.add_task("a").unwrap();
        engine.add_task("b").unwrap();
        engine.add_task("c").unwrap();

        let ids = ids(&engine);
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
    }

    #[test]
    fn test_toggle_twice_restores_original_state() {
        let mut engine = hydrated();
        engine.add_task("laundry").unwrap();
        let id = engine.tasks()[0].id.clone();

        engine.toggle(&id).unwrap();
        assert!(engine.tasks()[0].completed);
        engine.toggle(&id).unwrap();
        assert!(!engine.tasks()[0].completed);
    }

    #[test]
    fn test_toggle_missing_id_is_a_noop() {
        let mut engine = hydrated();
        engine.add_task("laundry").unwrap();
        let before = engine.tasks().to_vec();
        let writes = engine.store().writes;

        engine.toggle("no-such-id").unwrap();
        assert_eq!(engine.tasks(), &before[..]);
        assert_eq!(engine.store().writes, writes);
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let mut engine = hydrated();
        engine.add_task("a").unwrap();
        engine.add_task("b").unwrap();
        engine.add_task("c").unwrap();
        let middle = engine.tasks()[1].id.clone();

        engine.remove(&middle).unwrap();
        let texts: Vec<&str> = engine.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_missing_id_leaves_sequence_unchanged() {
        let mut engine = hydrated();
        engine.add_task("a").unwrap();
        engine.add_task("b").unwrap();
        let before = engine.tasks().to_vec();

        engine.remove("no-such-id").unwrap();
        assert_eq!(engine.tasks(), &before[..]);
    }

    #[test]
    fn test_reorder_front_to_third_slot() {
        let mut engine = hydrated();
        for text in ["A", "B", "C", "D"] {
            engine.add_task(text).unwrap();
        }

        engine.reorder(0, Some(2)).unwrap();
        let texts: Vec<&str> = engine.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn test_reorder_dropped_outside_is_a_noop() {
        let mut engine = hydrated();
        engine.add_task("a").unwrap();
        engine.add_task("b").unwrap();
        let before = engine.tasks().to_vec();
        let writes = engine.store().writes;

        engine.reorder(0, None).unwrap();
        assert_eq!(engine.tasks(), &before[..]);
        assert_eq!(engine.store().writes, writes);
    }

    #[test]
    fn test_mutations_before_hydrate_never_write() {
        let mut engine = TaskList::new(MemoryStore::default());
        engine.add_task("too early").unwrap();
        engine.toggle("x").unwrap();
        engine.reorder(0, Some(0)).unwrap();

        assert_eq!(engine.store().writes, 0);
        // The mutations themselves still apply in memory.
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_hydrate_unlocks_persistence() {
        let mut engine = TaskList::new(MemoryStore::default());
        assert!(!engine.is_loaded());

        engine.hydrate(None).unwrap();
        assert!(engine.is_loaded());

        engine.add_task("now it writes").unwrap();
        assert_eq!(engine.store().writes, 1);
        assert!(engine.store().get(TASKS_KEY).is_some());
    }

    #[test]
    fn test_hydrate_malformed_data_reports_but_still_loads() {
        let mut engine = TaskList::new(MemoryStore::default());
        let result = engine.hydrate(Some("{not json"));

        assert!(matches!(result, Err(DomainError::MalformedTaskData(_))));
        assert!(engine.is_loaded());
        assert!(engine.is_empty());
    }

    #[test]
    fn test_hydrate_normalizes_numeric_ids_to_strings() {
        let stored = r#"[{"id":1700000000000,"text":"old","completed":true}]"#;
        let mut engine = TaskList::new(MemoryStore::default());
        engine.hydrate(Some(stored)).unwrap();

        assert_eq!(engine.tasks()[0].id, "1700000000000");
        assert!(engine.tasks()[0].completed);
        // Legacy records carried the timestamp inside the id.
        assert_eq!(engine.tasks()[0].created_at, 1700000000000);
    }

    #[test]
    fn test_persist_then_hydrate_round_trips() {
        let stored = r#"[
            {"id":1700000000000,"text":"old","completed":false},
            {"id":"1700000000001-2","text":"new","completed":true,"created_at":1700000000001}
        ]"#;
        let mut engine = TaskList::new(MemoryStore::default());
        engine.hydrate(Some(stored)).unwrap();
        engine.persist().unwrap();

        let written = engine.store().get(TASKS_KEY).unwrap();
        let mut replayed = TaskList::new(MemoryStore::default());
        replayed.hydrate(Some(written.as_str())).unwrap();

        assert_eq!(replayed.tasks(), engine.tasks());
        for task in replayed.tasks() {
            assert!(!task.id.is_empty());
        }
    }
}
