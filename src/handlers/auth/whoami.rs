// handlers/auth/whoami.rs - GET /api/v1/auth/whoami handler

use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::auth::IdentityContext;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub user_id: String,
    pub user_email: String,
}

/// Echo the identity the gate resolved for this request
pub async fn whoami_get(identity: IdentityContext) -> ApiResult<WhoamiResponse> {
    let (Some(user_id), Some(user_email)) = (identity.subject_id(), identity.email()) else {
        // Only reachable if the route is mounted without an enforced gate
        return Err(ApiError::missing_credential("Authentication required"));
    };

    Ok(ApiResponse::success(
        "Current identity",
        WhoamiResponse {
            user_id: user_id.to_string(),
            user_email: user_email.to_string(),
        },
    ))
}
