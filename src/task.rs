//! Task data structure.
//!
//! A task is a flat record: no hierarchy, no tags. The serialized form is the
//! on-disk format and the HTTP wire format at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::Status;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied by `update`. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replaces the title only when non-empty.
    pub title: Option<String>,
    /// Replaces the description, empty string included.
    pub description: Option<String>,
    pub status: Option<Status>,
}

impl Task {
    /// Apply a patch in place. `id` and `created_at` are never touched.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title.filter(|t| !t.trim().is_empty()) {
            self.title = title;
        }
        if let Some(desc) = patch.description {
            self.description = desc;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}
