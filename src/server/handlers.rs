use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, Instrument};

use super::{ApiError, AppState};
use crate::db::TaskStore;
use crate::fields::{Status, StatusFilter};
use crate::ops::TaskService;
use crate::task::{Task, TaskPatch};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let filter = match query.status.as_deref() {
        None | Some("") => StatusFilter::All,
        Some(raw) => match raw.parse::<StatusFilter>() {
            Ok(f) => f,
            // Unknown filters match nothing.
            Err(_) => {
                debug!(status = raw, "unknown status filter");
                return Ok(Json(Vec::new()));
            }
        },
    };
    let tasks = with_service(&state, move |svc| svc.list(filter)).await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let title = req.title.unwrap_or_default();
    let description = req.description.unwrap_or_default();
    let task = with_service(&state, move |svc| svc.add(&title, &description)).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(req) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let status = match req.status.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<Status>().map_err(ApiError::bad_request)?),
    };
    let patch = TaskPatch {
        title: req.title,
        description: req.description,
        status,
    };
    let task = with_service(&state, move |svc| svc.update(id, patch)).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    with_service(&state, move |svc| svc.delete(id)).await?;
    Ok(Json(DeleteResponse {
        message: format!("Task {id} deleted"),
    }))
}

/// Run a task operation on the blocking pool; the store does synchronous file I/O.
async fn with_service<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&TaskService<Box<dyn TaskStore>>) -> crate::error::Result<T> + Send + 'static,
{
    let svc = Arc::clone(&state.tasks);
    let result = tokio::task::spawn_blocking(move || op(&*svc)).await?;
    Ok(result?)
}

/// Ids that are not numbers cannot exist, so they read as not found.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::not_found(format!("Task {raw} not found")))
}

pub async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let span = tracing::debug_span!(
        "http.request",
        method = %request.method(),
        route = %request.uri().path(),
    );
    async move {
        let response = next.run(request).await;
        debug!(status = response.status().as_u16(), "request finished");
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_id("12").unwrap(), 12);
    }

    #[test]
    fn non_numeric_id_is_not_found() {
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Task abc not found");
    }

    #[test]
    fn update_request_fields_are_optional() {
        let req: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none() && req.description.is_none() && req.status.is_none());
    }
}
