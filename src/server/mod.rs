//! HTTP front-end: JSON REST endpoints under `/api/tasks` and the browser page.

use std::path::PathBuf;
use std::sync::Arc;

use axum::middleware::from_fn;
use axum::routing::{get, put};
use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use crate::db::{JsonFileStore, TaskStore, DEFAULT_DB_FILE};
use crate::ops::TaskService;

mod assets;
mod error;
mod handlers;

pub use error::{ApiError, ServerError};

/// Service type shared by all request handlers.
pub type SharedService = Arc<TaskService<Box<dyn TaskStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub tasks: SharedService,
}

impl AppState {
    pub fn new(service: TaskService<Box<dyn TaskStore>>) -> Self {
        Self {
            tasks: Arc::new(service),
        }
    }

    /// State backed by the JSON file at `path`.
    pub fn with_json_file(path: impl Into<PathBuf>) -> Self {
        let store: Box<dyn TaskStore> = Box::new(JsonFileStore::new(path));
        Self::new(TaskService::new(store))
    }
}

/// Server settings, from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "task-server", version, about = "HTTP API and web page for the task list")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Path to the JSON database file. Defaults to tasks.json next to the executable.
    #[arg(long, env = "TASKS_FILE")]
    pub db: Option<PathBuf>,
}

impl ServerConfig {
    pub fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(default_db_path)
    }

    /// Bind the listener. `host` may be an IP literal or a name to resolve.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(|source| ServerError::Bind {
                host: self.host.clone(),
                port: self.port,
                source,
            })
    }
}

/// `tasks.json` in the directory holding the server binary.
fn default_db_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DB_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/tasks/:id",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .route("/app.js", get(assets::app_js))
        .fallback(assets::index)
        .layer(from_fn(handlers::log_requests))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let db_path = config.db_path();
    let app = build_router(AppState::with_json_file(&db_path));

    let listener = config.bind().await?;
    info!(db = %db_path.display(), "Server running on http://localhost:{}", config.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .map_err(ServerError::Serve)
}
