// handlers/users/create.rs - POST /api/v1/users handler

use axum::extract::State;

use crate::middleware::extract::ValidJson;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::{CreateUserRequest, UserResponse};
use crate::state::AppState;

/// Expected Input:
/// ```json
/// {
///   "name": "string",      // Required
///   "email": "string",     // Required, email shape
///   "password": "string",  // Required, at least 6 characters
///   "avatar": "string"     // Optional
/// }
/// ```
///
/// Responds 201 with the stored record (password omitted).
pub async fn user_create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateUserRequest>,
) -> ApiResult<UserResponse> {
    let user = state.users.create(payload.into()).await?;
    tracing::info!("User {} created", user.id);

    Ok(ApiResponse::created("User created", UserResponse::from(user)))
}
