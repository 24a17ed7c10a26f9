// handlers/users/update.rs - PUT /api/v1/users/:id handler

use axum::extract::State;

use crate::middleware::extract::{UserId, ValidJson};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::{UpdateUserRequest, UserResponse};
use crate::state::AppState;

/// Absent fields are left untouched; an empty `email` counts as absent.
pub async fn user_update(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidJson(payload): ValidJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    let user = state.users.update(id, payload.into()).await?;
    Ok(ApiResponse::success("User updated", UserResponse::from(user)))
}
