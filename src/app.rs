use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::{from_fn_with_state, map_response},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers;
use crate::middleware::auth::{auth_gate_middleware, AuthGate, AuthMode};
use crate::middleware::recovery;
use crate::state::AppState;

/// Build the complete route table. The returned router is immutable and is
/// handed to [`crate::server::serve`].
pub fn router(config: &AppConfig, state: AppState) -> Router {
    let mut app = Router::new()
        // Public
        .merge(system_routes())
        // Versioned API
        .nest("/api/v1", v1_routes(config, &state))
        .fallback(recovery::not_found_fallback)
        .layer(map_response(recovery::method_not_allowed_as_not_found))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    // Global middleware
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    if config.security.enable_cors {
        app = app.layer(cors_layer(config));
    }

    app.layer(recovery::catch_panic_layer())
}

fn system_routes() -> Router<AppState> {
    use handlers::system;

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
}

fn v1_routes(config: &AppConfig, state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/hello", get(handlers::system::hello))
        .merge(user_routes(config.security.users_auth, state))
        .merge(auth_routes(state))
}

fn user_routes(mode: Option<AuthMode>, state: &AppState) -> Router<AppState> {
    use handlers::users;

    let routes = Router::new()
        // Collection
        .route("/users", get(users::user_list).post(users::user_create))
        // Individual record
        .route(
            "/users/:id",
            get(users::user_show)
                .put(users::user_update)
                .delete(users::user_delete),
        );

    match mode {
        Some(mode) => gated(routes, mode, state),
        None => routes,
    }
}

fn auth_routes(state: &AppState) -> Router<AppState> {
    use handlers::auth;

    let routes = Router::new().route("/auth/whoami", get(auth::whoami_get));
    gated(routes, AuthMode::Enforced, state)
}

/// Apply an auth gate to every route in the group. `route_layer` keeps
/// unmatched paths falling through to 404 instead of 401.
fn gated(routes: Router<AppState>, mode: AuthMode, state: &AppState) -> Router<AppState> {
    let gate = AuthGate::new(mode, state.tokens.clone());
    routes.route_layer(from_fn_with_state(gate, auth_gate_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.is_development() {
        return CorsLayer::permissive();
    }
    allowed_origins(&config.security)
}

fn allowed_origins(security: &SecurityConfig) -> CorsLayer {
    let allow_origin = if security.cors_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = security
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Skipping invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
