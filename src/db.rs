//! Persistence for the task list.
//!
//! The whole collection is read on every access and written back in full after
//! every change. `TaskStore` is the seam the task operations depend on, so tests
//! can swap the JSON file for `MemoryStore`.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::error::Result;
use crate::task::Task;

/// Default file name for the JSON store.
pub const DEFAULT_DB_FILE: &str = "tasks.json";

/// Load and save a whole sequence of tasks.
pub trait TaskStore: Send + Sync {
    /// Read every stored task. A store that was never written is empty.
    fn load(&self) -> Result<Vec<Task>>;

    /// Replace the stored collection with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

impl<T: TaskStore + ?Sized> TaskStore for Box<T> {
    fn load(&self) -> Result<Vec<Task>> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        (**self).save(tasks)
    }
}

/// Tasks stored as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Task>> {
        let mut buf = String::new();
        match File::open(&self.path) {
            Ok(mut f) => {
                f.read_to_string(&mut buf)?;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "task store absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        }
        let tasks: Vec<Task> = serde_json::from_str(&buf)?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Atomic-ish write via temp file + rename.
    fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(tasks)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// In-memory store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }
}

impl TaskStore for MemoryStore {
    fn load(&self) -> Result<Vec<Task>> {
        Ok(self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        *self.tasks.lock().unwrap_or_else(PoisonError::into_inner) = tasks.to_vec();
        Ok(())
    }
}

/// Generate the next available task ID: one past the current maximum.
pub fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

/// Position of the task with `id`, if present.
pub fn position(tasks: &[Task], id: u64) -> Option<usize> {
    tasks.iter().position(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::fields::Status;
    use chrono::{TimeZone, Utc};

    fn task(id: u64, title: &str, status: Status) -> Task {
        Task {
            id,
            title: title.into(),
            description: String::new(),
            status,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, id as u32).unwrap(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));
        let mut t2 = task(2, "second", Status::Done);
        t2.description = "with \"quotes\" and <tags>".into();
        let tasks = vec![task(1, "first", Status::NotDone), t2];

        store.save(&tasks).unwrap();
        assert_eq!(store.load().unwrap(), tasks);
        assert!(!dir.path().join("tasks.json.tmp").exists());
    }

    #[test]
    fn save_writes_two_space_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let store = JsonFileStore::new(&path);
        store.save(&[task(1, "a", Status::NotDone)]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"id\": 1,"));
        assert!(raw.contains("\"createdAt\""));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/data/tasks.json"));
        store.save(&[]).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "[{ not json").unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, TrackerError::Parse(_)));
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        store.save(&[task(5, "x", Status::Done)]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn next_id_is_one_past_max() {
        assert_eq!(next_id(&[]), 1);
        let tasks = vec![task(4, "a", Status::Done), task(2, "b", Status::Done)];
        assert_eq!(next_id(&tasks), 5);
        assert_eq!(position(&tasks, 2), Some(1));
        assert_eq!(position(&tasks, 9), None);
    }
}
