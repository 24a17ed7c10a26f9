use axum::{
    extract::{FromRequest, FromRequestParts, Json, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, FieldErrors};

/// Request bodies that check their own shape after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// JSON body that has been deserialized and validated.
/// Any binding failure becomes `InvalidPayload` instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Rejecting request body: {}", rejection.body_text());
            ApiError::invalid_payload(format!("Invalid request payload: {}", rejection.body_text()), None)
        })?;

        value
            .validate()
            .map_err(|fields| ApiError::invalid_payload("Invalid request payload", Some(fields)))?;

        Ok(Self(value))
    }
}

/// Numeric user id taken from the `:id` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub u32);

/// Only plain ASCII digits fitting in 32 bits; signs and whitespace are rejected
pub fn parse_user_id(raw: &str) -> Result<u32, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::invalid_identifier(format!("Invalid user id '{}'", raw)));
    }
    raw.parse::<u32>()
        .map_err(|_| ApiError::invalid_identifier(format!("Invalid user id '{}'", raw)))
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::invalid_identifier("Invalid user id"))?;

        parse_user_id(&raw).map(UserId)
    }
}
