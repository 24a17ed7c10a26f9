use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::error::ApiError;

/// Success envelope: `{message, data}`, `{message, data, total}` for listings,
/// or `{message, id}` when only the identifier is echoed back
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Wrapper for API responses that carries the envelope and its status code
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub envelope: Envelope<T>,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    fn new(status_code: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            envelope: Envelope {
                message: message.into(),
                data,
                total: None,
                id: None,
            },
            status_code,
        }
    }

    /// 200 OK with a single payload
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, Some(data))
    }

    /// 201 Created
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, Some(data))
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// 200 OK listing; `total` always equals the number of items in `data`
    pub fn listing(message: impl Into<String>, items: Vec<T>) -> Self {
        let total = items.len();
        let mut response = Self::new(StatusCode::OK, message, Some(items));
        response.envelope.total = Some(total);
        response
    }
}

impl ApiResponse<()> {
    /// 200 OK echoing the identifier the request acted on
    pub fn acknowledged(message: impl Into<String>, id: impl ToString) -> Self {
        let mut response = Self::new(StatusCode::OK, message, None);
        response.envelope.id = Some(id.to_string());
        response
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.envelope)).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_total_matches_items() {
        let response = ApiResponse::listing("Users", vec!["a", "b", "c"]);
        let body = serde_json::to_value(&response.envelope).unwrap();
        assert_eq!(response.status_code, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn acknowledged_echoes_id_without_data() {
        let response = ApiResponse::acknowledged("User deleted", 7u32);
        let body = serde_json::to_value(&response.envelope).unwrap();
        assert_eq!(body["id"], "7");
        assert!(body.get("data").is_none());
        assert!(body.get("total").is_none());
    }
}
