//! Task operations shared by the CLI and the HTTP server.
//!
//! Every call is one load-mutate-save cycle over the whole collection. A mutex
//! held across the cycle makes the service the single writer for its store
//! within a process; separate processes sharing a file are not coordinated.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::db::{next_id, position, TaskStore};
use crate::error::{Result, TrackerError};
use crate::fields::{Status, StatusFilter};
use crate::task::{Task, TaskPatch};

pub struct TaskService<S> {
    store: S,
    clock: Box<dyn Clock>,
    write_lock: Mutex<()>,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: S, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
            write_lock: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a task with status `not_done` and persist it.
    pub fn add(&self, title: &str, description: &str) -> Result<Task> {
        if title.trim().is_empty() {
            return Err(TrackerError::Validation("Title is required".into()));
        }
        let _guard = self.lock();
        let mut tasks = self.store.load()?;
        let task = Task {
            id: next_id(&tasks),
            title: title.to_string(),
            description: description.to_string(),
            status: Status::NotDone,
            created_at: self.clock.now(),
        };
        tasks.push(task.clone());
        self.store.save(&tasks)?;
        info!(id = task.id, "task added");
        Ok(task)
    }

    /// Apply a partial update to the task with `id`.
    pub fn update(&self, id: u64, patch: TaskPatch) -> Result<Task> {
        self.modify(id, |t| t.apply(patch))
    }

    pub fn set_status(&self, id: u64, status: Status) -> Result<Task> {
        self.modify(id, |t| t.status = status)
    }

    /// Remove the task with `id` and return it.
    pub fn delete(&self, id: u64) -> Result<Task> {
        let _guard = self.lock();
        let mut tasks = self.store.load()?;
        let idx = position(&tasks, id).ok_or(TrackerError::NotFound(id))?;
        let removed = tasks.remove(idx);
        self.store.save(&tasks)?;
        info!(id, "task deleted");
        Ok(removed)
    }

    /// Tasks passing `filter`, in stored order.
    pub fn list(&self, filter: StatusFilter) -> Result<Vec<Task>> {
        let tasks = self.store.load()?;
        Ok(tasks
            .into_iter()
            .filter(|t| filter.matches(t.status))
            .collect())
    }

    fn modify(&self, id: u64, f: impl FnOnce(&mut Task)) -> Result<Task> {
        let _guard = self.lock();
        let mut tasks = self.store.load()?;
        let idx = position(&tasks, id).ok_or(TrackerError::NotFound(id))?;
        f(&mut tasks[idx]);
        let updated = tasks[idx].clone();
        self.store.save(&tasks)?;
        info!(id, status = %updated.status, "task updated");
        Ok(updated)
    }
}
