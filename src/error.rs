//! Error type shared by the store, the task operations and both front-ends.

use thiserror::Error;

/// Everything that can go wrong while reading or changing the task list.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(String),

    #[error("Task {0} not found")]
    NotFound(u64),

    #[error("task store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a JSON array of tasks.
    #[error("task store is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TrackerError {
    /// True for errors caused by the request rather than by the store.
    pub fn is_user_error(&self) -> bool {
        matches!(self, TrackerError::Validation(_) | TrackerError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
