use std::borrow::Cow;
use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ApiError;

const BEARER_SCHEME: &str = "Bearer";

/// How a gate treats requests whose credential is absent or unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Reject with 401 before any handler runs
    Enforced,
    /// Attach identity when possible, otherwise continue anonymously
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingCredential,
    #[error("Invalid Authorization header: {0}")]
    MalformedCredential(&'static str),
}

/// Identity resolved for the current request.
///
/// Every request starts anonymous. The auth gate replaces it at most once,
/// and only with an authenticated identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdentityContext {
    pub subject_id: String,
    pub email: String,
    pub authenticated: bool,
}

impl IdentityContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(subject_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
            authenticated: true,
        }
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.authenticated.then_some(self.subject_id.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.authenticated.then_some(self.email.as_str())
    }
}

/// Handlers read the identity the gate left in the request extensions.
/// Routes without a gate, or optional gates that found nothing, see an anonymous identity.
#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for IdentityContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<IdentityContext>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Turns a well-formed bearer token into an identity
pub trait TokenResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Result<IdentityContext, AuthError>;
}

/// Accepts any non-empty token as the fixed demo user.
/// Replace with a signature/expiry checking resolver before exposing real data.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderTokenResolver;

impl PlaceholderTokenResolver {
    pub const SUBJECT_ID: &'static str = "1";
    pub const EMAIL: &'static str = "user@example.com";
}

impl TokenResolver for PlaceholderTokenResolver {
    fn resolve(&self, token: &str) -> Result<IdentityContext, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MalformedCredential("empty token"));
        }
        Ok(IdentityContext::authenticated(Self::SUBJECT_ID, Self::EMAIL))
    }
}

/// Split `Bearer <token>` on single spaces, requiring exactly two parts.
///
/// Works on raw header bytes so tokens outside visible ASCII are still accepted.
/// `Bearer a b` and `Bearer tok ` (trailing space) both have three parts and are rejected.
pub fn parse_bearer(header: &[u8]) -> Result<&[u8], AuthError> {
    let mut parts = header.split(|b| *b == b' ');
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::MalformedCredential("expected 'Bearer <token>'"));
    };

    if scheme != BEARER_SCHEME.as_bytes() {
        return Err(AuthError::MalformedCredential("unsupported authorization scheme"));
    }
    if token.is_empty() {
        return Err(AuthError::MalformedCredential("empty token"));
    }

    Ok(token)
}

/// Extract the bearer token from the Authorization header
fn read_credential(headers: &HeaderMap) -> Result<Cow<'_, str>, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingCredential)?;

    // An empty header counts as absent
    if value.is_empty() {
        return Err(AuthError::MissingCredential);
    }

    let token = parse_bearer(value.as_bytes())?;
    Ok(String::from_utf8_lossy(token))
}

/// Short digest so tokens can be correlated in logs without being written out
fn fingerprint(token: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(token.as_bytes()));
    digest[..12].to_string()
}

/// Authentication gate attached to a route group
#[derive(Clone)]
pub struct AuthGate {
    mode: AuthMode,
    resolver: Arc<dyn TokenResolver>,
}

impl AuthGate {
    pub fn new(mode: AuthMode, resolver: Arc<dyn TokenResolver>) -> Self {
        Self { mode, resolver }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Decide the identity for a request, or the error that rejects it
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<IdentityContext, AuthError> {
        let outcome = read_credential(headers).and_then(|token| {
            let identity = self.resolver.resolve(&token)?;
            tracing::debug!(token = %fingerprint(&token), subject = %identity.subject_id, "Credential accepted");
            Ok(identity)
        });

        match (self.mode, outcome) {
            (_, Ok(identity)) => Ok(identity),
            (AuthMode::Enforced, Err(err)) => {
                tracing::warn!("Rejecting request: {}", err);
                Err(err)
            }
            (AuthMode::Optional, Err(AuthError::MissingCredential)) => Ok(IdentityContext::anonymous()),
            (AuthMode::Optional, Err(err)) => {
                tracing::warn!("Ignoring unusable credential on optional route: {}", err);
                Ok(IdentityContext::anonymous())
            }
        }
    }
}

/// Middleware wrapping a route group with an [`AuthGate`].
/// Rejections short-circuit; the inner handler never runs.
pub async fn auth_gate_middleware(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = gate.authenticate(request.headers())?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get, Json, Router};
    use axum::http::HeaderValue;
    use tower::ServiceExt;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn gate(mode: AuthMode) -> AuthGate {
        AuthGate::new(mode, Arc::new(PlaceholderTokenResolver))
    }

    #[test]
    fn parse_bearer_accepts_exactly_two_parts() {
        assert_eq!(parse_bearer(b"Bearer abc.def"), Ok(&b"abc.def"[..]));
        assert_eq!(parse_bearer("Bearer tökén".as_bytes()), Ok("tökén".as_bytes()));
    }

    #[test]
    fn parse_bearer_rejects_malformed_headers() {
        for header in [
            "Bearer",
            "Bearer ",
            "bearer abc",
            "Basic abc",
            "Bearer a b",
            "Bearer abc ",
            "Bearer  abc",
            " Bearer abc",
            "Token",
        ] {
            assert!(
                matches!(parse_bearer(header.as_bytes()), Err(AuthError::MalformedCredential(_))),
                "expected malformed for {:?}",
                header
            );
        }
    }

    #[test]
    fn enforced_gate_outcomes() {
        let gate = gate(AuthMode::Enforced);

        assert_eq!(gate.authenticate(&HeaderMap::new()), Err(AuthError::MissingCredential));
        assert_eq!(gate.authenticate(&headers_with("")), Err(AuthError::MissingCredential));
        assert!(matches!(
            gate.authenticate(&headers_with("Bearer a b")),
            Err(AuthError::MalformedCredential(_))
        ));

        let identity = gate.authenticate(&headers_with("Bearer token-123")).unwrap();
        assert!(identity.authenticated);
        assert_eq!(identity.subject_id(), Some("1"));
        assert_eq!(identity.email(), Some("user@example.com"));
    }

    #[test]
    fn enforced_gate_accepts_non_ascii_tokens() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes("Bearer tökén".as_bytes()).unwrap());
        let identity = gate(AuthMode::Enforced).authenticate(&headers).unwrap();
        assert!(identity.authenticated);

        // Raw non-UTF-8 bytes still count as a non-empty token
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap());
        assert!(gate(AuthMode::Enforced).authenticate(&headers).is_ok());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes("Bearer tö kén".as_bytes()).unwrap());
        assert!(matches!(
            gate(AuthMode::Enforced).authenticate(&headers),
            Err(AuthError::MalformedCredential(_))
        ));
    }

    #[test]
    fn optional_gate_never_rejects() {
        let gate = gate(AuthMode::Optional);

        for headers in [HeaderMap::new(), headers_with("Basic abc"), headers_with("Bearer ")] {
            let identity = gate.authenticate(&headers).unwrap();
            assert_eq!(identity, IdentityContext::anonymous());
            assert_eq!(identity.subject_id(), None);
        }

        let identity = gate.authenticate(&headers_with("Bearer t")).unwrap();
        assert!(identity.authenticated);
    }

    #[test]
    fn fingerprint_is_short_and_stable() {
        assert_eq!(fingerprint("abc"), fingerprint("abc"));
        assert_eq!(fingerprint("abc").len(), 12);
        assert_ne!(fingerprint("abc"), fingerprint("abd"));
    }

    async fn echo_identity(identity: IdentityContext) -> Json<IdentityContext> {
        Json(identity)
    }

    fn gated_router(mode: AuthMode) -> Router {
        Router::new()
            .route("/probe", get(echo_identity))
            .route_layer(axum::middleware::from_fn_with_state(gate(mode), auth_gate_middleware))
    }

    async fn call(router: Router, auth: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = axum::http::Request::builder().uri("/probe");
        if let Some(auth) = auth {
            builder = builder.header(AUTHORIZATION, auth);
        }
        let resp = router.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn middleware_short_circuits_with_error_kind() {
        let (status, body) = call(gated_router(AuthMode::Enforced), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "MissingCredential");

        let (status, body) = call(gated_router(AuthMode::Enforced), Some("Bearer x y")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "MalformedCredential");
    }

    #[tokio::test]
    async fn middleware_populates_identity_for_handlers() {
        let (status, body) = call(gated_router(AuthMode::Enforced), Some("Bearer abc")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["subject_id"], "1");

        let (status, body) = call(gated_router(AuthMode::Optional), Some("Nope")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authenticated"], false);
        assert_eq!(body["subject_id"], "");
    }
}
