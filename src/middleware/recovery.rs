use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::ApiError;

pub type PanicResponder = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Outermost layer: a panicking handler yields a 500 envelope and the server keeps serving
pub fn catch_panic_layer() -> CatchPanicLayer<PanicResponder> {
    CatchPanicLayer::custom(panic_response as PanicResponder)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!("Request handler panicked: {}", detail);
    ApiError::internal_server_error("Internal server error").into_response()
}

/// Routes match on path first; a known path with the wrong method is reported as 404
pub async fn method_not_allowed_as_not_found(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return route_not_found().into_response();
    }
    response
}

/// Fallback for unmatched routes
pub async fn not_found_fallback() -> ApiError {
    route_not_found()
}

fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
