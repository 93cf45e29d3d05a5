//! Permissive cross-origin headers for endpoints called from browser demos.

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

/// Header values stamped onto every response of a router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allow_origin: &'static str,
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
}

/// Credit/profile endpoint: a single POST route.
pub const PROFILE_CORS: CorsPolicy = CorsPolicy {
    allow_origin: "*",
    allow_methods: "POST, OPTIONS",
    allow_headers: "Content-Type, Authorization",
};

/// Self-attestation service: the usual browser verbs on every route.
pub const ATTESTATION_CORS: CorsPolicy = CorsPolicy {
    allow_origin: "*",
    allow_methods: "GET, HEAD, PUT, PATCH, POST, DELETE",
    allow_headers: "Content-Type, Authorization",
};

/// `from_fn_with_state` middleware applying `policy` after the inner
/// service has answered, errors and preflights included.
pub async fn apply_cors(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(policy.allow_origin),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(policy.allow_methods),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(policy.allow_headers),
    );
    response
}
