// handlers/users/show.rs - GET /api/v1/users/:id handler

use axum::extract::State;

use crate::middleware::extract::UserId;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::UserResponse;
use crate::state::AppState;

pub async fn user_show(State(state): State<AppState>, UserId(id): UserId) -> ApiResult<UserResponse> {
    let user = state.users.get(id).await?;
    Ok(ApiResponse::success("User retrieved", UserResponse::from(user)))
}
