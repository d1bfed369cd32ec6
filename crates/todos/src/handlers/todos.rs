//! Todo CRUD handlers.
//!
//! Every handler answers with the `{code, data, message}` envelope. Extractor
//! rejections are taken as `Result`s so malformed input also gets the envelope
//! instead of axum's plain-text rejection body. Bodies are decoded as JSON
//! whatever `Content-Type` the request carries.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

use todos_core::api::ApiResponse;
use todos_core::storage::RepositoryError;
use todos_core::todo::{CreateTodoRequest, TodoId, TodoItem, UpdateTodoRequest};

use crate::{handlers::AppError, state::AppState};

/// Parses the `{id}` path segment. Only positive integers written as plain
/// ASCII digits are valid ids; signs and whitespace are rejected.
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<TodoId, AppError> {
    let Path(raw) = path.map_err(|_| AppError::InvalidId)?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::InvalidId);
    }
    match raw.parse::<TodoId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidId),
    }
}

/// Decodes a JSON body, turning a read or decode failure into a 400.
fn parse_body<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, AppError> {
    let bytes = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Json::<T>::from_bytes(&bytes)
        .map(|Json(payload)| payload)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

// ============================================================================
// List Todos
// ============================================================================

/// List all todos, newest first (GET /api/todos).
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TodoItem>>>, AppError> {
    let todos = state.todo_repo.list_todos().await?;

    tracing::debug!(count = todos.len(), "Listed todos");

    Ok(Json(ApiResponse::success(todos)))
}

// ============================================================================
// Get Todo
// ============================================================================

/// Get a single todo by ID (GET /api/todos/{id}).
pub async fn get_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<TodoItem>>, AppError> {
    let id = parse_id(path)?;

    let todo = state
        .todo_repo
        .get_todo(id)
        .await?
        .ok_or_else(|| RepositoryError::todo_not_found(id))?;

    Ok(Json(ApiResponse::success(todo)))
}

// ============================================================================
// Create Todo
// ============================================================================

/// Create a new todo (POST /api/todos).
pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TodoItem>>), AppError> {
    let payload: CreateTodoRequest = parse_body(body)?;
    tracing::debug!(payload = ?payload, "Received create todo request");

    payload.validate()?;

    let todo = state.todo_repo.create_todo(&payload).await?;

    tracing::info!(todo_id = todo.id, title = %todo.title, "Created new todo");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(todo))))
}

// ============================================================================
// Update Todo
// ============================================================================

/// Update a todo by ID (PUT /api/todos/{id}).
///
/// Only the fields present in the body change; omitted fields keep their value.
pub async fn update_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse<TodoItem>>, AppError> {
    let id = parse_id(path)?;
    let payload: UpdateTodoRequest = parse_body(body)?;
    tracing::debug!(todo_id = id, payload = ?payload, "Received update todo request");

    payload.validate()?;

    let todo = state.todo_repo.update_todo(id, payload).await?;

    tracing::info!(todo_id = id, completed = todo.completed, "Updated todo");

    Ok(Json(ApiResponse::success(todo)))
}

// ============================================================================
// Delete Todo
// ============================================================================

/// Delete a todo by ID (DELETE /api/todos/{id}).
pub async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(path)?;
    tracing::debug!(todo_id = id, "Received delete todo request");

    state.todo_repo.delete_todo(id).await?;

    tracing::info!(todo_id = id, "Deleted todo");

    Ok(Json(ApiResponse::empty()))
}
