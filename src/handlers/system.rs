// handlers/system.rs - Unauthenticated service endpoints

use axum::response::Json;
use serde_json::{json, Value};

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Pocket Code API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health - liveness probe; the in-memory store has nothing to ping
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Service is running",
        "timestamp": chrono::Utc::now(),
    }))
}

/// GET /api/v1/hello
pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello, World!" }))
}
