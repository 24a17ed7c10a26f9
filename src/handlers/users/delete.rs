// handlers/users/delete.rs - DELETE /api/v1/users/:id handler

use axum::extract::State;

use crate::middleware::extract::UserId;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn user_delete(State(state): State<AppState>, UserId(id): UserId) -> ApiResult<()> {
    state.users.delete(id).await?;
    tracing::info!("User {} deleted", id);

    Ok(ApiResponse::acknowledged("User deleted", id))
}
