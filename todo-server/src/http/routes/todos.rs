//! Todo endpoints
//!
//! Every handler resolves `CurrentUser` before touching the body and passes
//! the caller's id down as the owner. A todo belonging to someone else is
//! reported exactly like a missing one.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiPath, ApiQuery, CurrentUser};
use crate::models::{ListTodosParams, Message, NewTodo, TodoFilter, TodoList, TodoPatch, TodoPublic};
use crate::state::AppState;

pub const DELETED_MESSAGE: &str = "Task has been deleted successfully.";

/// POST /todos/ - create a todo owned by the caller
async fn create_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(todo): ApiJson<NewTodo>,
) -> Result<(StatusCode, Json<TodoPublic>), ApiError> {
    let created = state.store().create_todo(user.id, &todo).await?;
    tracing::info!(user_id = user.id, todo_id = created.id, state = %created.state, "Todo created");

    Ok((StatusCode::CREATED, Json(TodoPublic::from(created))))
}

/// GET /todos/ - list the caller's todos
async fn list_todos(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(params): ApiQuery<ListTodosParams>,
) -> Result<Json<TodoList>, ApiError> {
    let filter = TodoFilter::try_from(params)?;
    let todos = state.store().list_todos(user.id, &filter).await?;
    tracing::debug!(user_id = user.id, count = todos.len(), ?filter, "Listed todos");

    Ok(Json(TodoList {
        todos: todos.into_iter().map(TodoPublic::from).collect(),
    }))
}

/// PATCH /todos/{id} - overwrite only the supplied fields
async fn patch_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<TodoPatch>,
) -> Result<Json<TodoPublic>, ApiError> {
    let updated = state.store().update_todo(user.id, id, &patch).await?;
    tracing::info!(user_id = user.id, todo_id = id, "Todo updated");

    Ok(Json(TodoPublic::from(updated)))
}

/// DELETE /todos/{id}
async fn delete_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Message>, ApiError> {
    state.store().delete_todo(user.id, id).await?;
    tracing::info!(user_id = user.id, todo_id = id, "Todo deleted");

    Ok(Json(Message::new(DELETED_MESSAGE)))
}

/// Todo routes; the collection answers with and without a trailing slash
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(patch_todo).delete(delete_todo))
}
