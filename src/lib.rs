#![forbid(unsafe_code)]

//! # Task Tracker
//!
//! A small task list kept in a single JSON file, with two front-ends sharing
//! the same operations:
//!
//! - `task-tracker`: a command-line tool (`add`, `update`, `delete`, `mark`, `list`).
//! - `task-server`: a JSON REST API under `/api/tasks` plus a browser page.
//!
//! ```bash
//! task-tracker add "Buy milk" "2%"
//! task-tracker mark 1 in_progress
//! task-tracker list in_progress
//! PORT=8080 task-server
//! ```
//!
//! Every operation loads the full list, changes it and writes it back.

pub mod cli;
pub mod clock;
pub mod cmd;
pub mod db;
pub mod error;
pub mod fields;
pub mod ops;
pub mod server;
pub mod task;

pub use db::{JsonFileStore, MemoryStore, TaskStore};
pub use error::{Result, TrackerError};
pub use fields::{Status, StatusFilter};
pub use ops::TaskService;
pub use task::{Task, TaskPatch};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr `tracing` subscriber, honouring `RUST_LOG` when set.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
