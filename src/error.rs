// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Per-field validation messages, keyed by JSON field name
pub type FieldErrors = BTreeMap<String, String>;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    InvalidIdentifier(String),
    InvalidPayload {
        message: String,
        field_errors: Option<FieldErrors>,
    },

    // 401 Unauthorized
    MissingCredential(String),
    MalformedCredential(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential(_) => StatusCode::UNAUTHORIZED,
            ApiError::MalformedCredential(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidIdentifier(msg) => msg,
            ApiError::InvalidPayload { message, .. } => message,
            ApiError::MissingCredential(msg) => msg,
            ApiError::MalformedCredential(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Machine-readable error kind for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidIdentifier(_) => "InvalidIdentifier",
            ApiError::InvalidPayload { .. } => "InvalidPayload",
            ApiError::MissingCredential(_) => "MissingCredential",
            ApiError::MalformedCredential(_) => "MalformedCredential",
            ApiError::NotFound(_) => "NotFound",
            ApiError::InternalServerError(_) => "InternalError",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": self.message(),
            "code": self.error_code(),
        });

        if let ApiError::InvalidPayload {
            field_errors: Some(fields),
            ..
        } = self
        {
            body["fields"] = json!(fields);
        }

        body
    }
}

impl ApiError {
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        ApiError::InvalidIdentifier(message.into())
    }

    pub fn invalid_payload(message: impl Into<String>, field_errors: Option<FieldErrors>) -> Self {
        ApiError::InvalidPayload {
            message: message.into(),
            field_errors,
        }
    }

    pub fn missing_credential(message: impl Into<String>) -> Self {
        ApiError::MissingCredential(message.into())
    }

    pub fn malformed_credential(message: impl Into<String>) -> Self {
        ApiError::MalformedCredential(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert domain error types to ApiError
impl From<crate::middleware::auth::AuthError> for ApiError {
    fn from(err: crate::middleware::auth::AuthError) -> Self {
        use crate::middleware::auth::AuthError;

        match err {
            AuthError::MissingCredential => ApiError::missing_credential(err.to_string()),
            AuthError::MalformedCredential(_) => ApiError::malformed_credential(err.to_string()),
        }
    }
}

impl From<crate::store::StoreError> for ApiError {
    fn from(err: crate::store::StoreError) -> Self {
        match err {
            crate::store::StoreError::NotFound(id) => {
                ApiError::not_found(format!("User {} not found", id))
            }
            crate::store::StoreError::Backend(msg) => {
                // Log the real error but return generic message
                tracing::error!("User store error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_errors_are_unauthorized() {
        assert_eq!(ApiError::missing_credential("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::malformed_credential("x").status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn payload_errors_carry_field_messages() {
        let mut fields = FieldErrors::new();
        fields.insert("password".to_string(), "This field is required".to_string());

        let body = ApiError::invalid_payload("Invalid request payload", Some(fields)).to_json();
        assert_eq!(body["code"], "InvalidPayload");
        assert_eq!(body["error"], "Invalid request payload");
        assert_eq!(body["fields"]["password"], "This field is required");
    }

    #[test]
    fn store_not_found_maps_to_404() {
        let err: ApiError = crate::store::StoreError::NotFound(42).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NotFound");
    }
}
