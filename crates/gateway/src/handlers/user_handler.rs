//! User handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use common::AppResult;
use domain::UserResponse;

use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/usuarios", get(list_users))
}

/// List all registered users. Password hashes are never included.
#[utoipa::path(
    get,
    path = "/usuarios",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
