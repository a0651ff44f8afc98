//! Token issuance

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::auth;
use crate::http::error::ApiError;
use crate::http::extractors::ApiForm;
use crate::models::{AccessToken, LoginForm};
use crate::state::AppState;

/// POST /auth/token - exchange username and password for a bearer token
///
/// Takes a form body with the OAuth2 password-grant field names, so stock
/// OAuth2 clients can log in.
async fn login(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<AccessToken>, ApiError> {
    let user = auth::authenticate(state.store(), &form.username, &form.password).await?;
    let token = auth::issue_token(state.store(), user.id).await?;

    Ok(Json(AccessToken::bearer(token)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/auth/token", post(login))
}
