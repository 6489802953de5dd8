//! Handlers for the user endpoints (conventional glue).

use axum::extract::State;
use axum::Json;

use shelfmark_core::{CreateUserRequest, User};

use super::ApiError;
use crate::AppState;

/// `POST /users` — register a new user.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.create(req).await?;
    Ok(Json(user))
}

/// `GET /users` — list all users.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}
