//! User account endpoints
//!
//! Registration and listing are open. Updating or deleting an account
//! requires a bearer token for that same account; any other id answers
//! 400 "Not enough permissions" whether or not it exists.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::auth;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiPath, ApiQuery, CurrentUser};
use crate::models::{Message, NewUser, PageParams, Pagination, UserList, UserPublic};
use crate::state::AppState;

pub const USER_DELETED_MESSAGE: &str = "User deleted";

/// POST /users/ - register an account
async fn create_user(
    State(state): State<AppState>,
    ApiJson(user): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<UserPublic>), ApiError> {
    let created = auth::register(state.store(), &user).await?;

    Ok((StatusCode::CREATED, Json(UserPublic::from(created))))
}

/// GET /users/
async fn list_users(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<UserList>, ApiError> {
    let users = state.store().list_users(&Pagination::from(params)).await?;

    Ok(Json(UserList {
        users: users.into_iter().map(UserPublic::from).collect(),
    }))
}

/// PUT /users/{id} - replace the caller's own account
async fn update_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(user): ApiJson<NewUser>,
) -> Result<Json<UserPublic>, ApiError> {
    if current.id != id {
        tracing::warn!(user_id = current.id, target = id, "Refused account update");
        return Err(ApiError::NotEnoughPermissions);
    }

    let updated = auth::update_account(state.store(), id, &user).await?;
    Ok(Json(UserPublic::from(updated)))
}

/// DELETE /users/{id} - delete the caller's own account and its todos
async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Message>, ApiError> {
    if current.id != id {
        tracing::warn!(user_id = current.id, target = id, "Refused account delete");
        return Err(ApiError::NotEnoughPermissions);
    }

    state.store().delete_user(id).await?;
    tracing::info!(user_id = id, "User deleted");

    Ok(Json(Message::new(USER_DELETED_MESSAGE)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
}
