// handlers/users/list.rs - GET /api/v1/users handler

use axum::extract::State;

use crate::middleware::auth::IdentityContext;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::UserResponse;
use crate::state::AppState;

pub async fn user_list(
    State(state): State<AppState>,
    identity: IdentityContext,
) -> ApiResult<Vec<UserResponse>> {
    let users = state.users.list().await?;

    tracing::debug!(
        caller = identity.subject_id().unwrap_or("anonymous"),
        "Listing {} users",
        users.len()
    );

    let data: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(ApiResponse::listing("Users retrieved", data))
}
