use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, warn};

use super::domain::{
    AttestationResponse, AttestationSubmission, MockVerificationRequest, VerificationView,
};
use super::repository::VerificationRepository;
use super::service::AttestationService;
use crate::extract::ValidatedJson;
use crate::verification::cors::{apply_cors, ATTESTATION_CORS};

pub const SERVICE_NAME: &str = "kyc-self-verifier";

/// Router exposing health, attestation submit, lookup and mock endpoints.
/// Every route answers CORS preflights and carries permissive CORS headers.
pub fn attestation_router<R>(service: Arc<AttestationService<R>>) -> Router
where
    R: VerificationRepository + 'static,
{
    Router::new()
        .route(
            "/health",
            get(health_handler::<R>).options(preflight_handler),
        )
        .route(
            "/api/verify",
            post(submit_handler::<R>).options(preflight_handler),
        )
        .route(
            "/api/user-verification/:address",
            get(lookup_handler::<R>).options(preflight_handler),
        )
        .route(
            "/api/mock-verify",
            post(mock_verify_handler::<R>).options(preflight_handler),
        )
        .with_state(service)
        .layer(from_fn_with_state(ATTESTATION_CORS, apply_cors))
}

pub(crate) async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub(crate) async fn health_handler<R>(State(service): State<Arc<AttestationService<R>>>) -> Response
where
    R: VerificationRepository + 'static,
{
    match service.stored_verifications() {
        Ok(count) => Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "stored_verifications": count,
        }))
        .into_response(),
        Err(err) => {
            error!(error = %err, "health check could not read the verification store");
            let payload = json!({
                "status": "unhealthy",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
                "error": err.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
    }
}

/// Failures are reported in the body with a 200 status.
pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AttestationService<R>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<AttestationResponse>
where
    R: VerificationRepository + 'static,
{
    let submission = match decode_submission(&headers, &body) {
        Ok(submission) => submission,
        Err(reason) => {
            warn!(%reason, "attestation payload rejected");
            return Json(AttestationResponse::error(reason));
        }
    };

    match service.submit(submission) {
        Ok(record) => Json(AttestationResponse::success(record.summary())),
        Err(err) => {
            error!(error = %err, "attestation verification failed");
            Json(AttestationResponse::error(err.to_string()))
        }
    }
}

pub(crate) async fn lookup_handler<R>(
    State(service): State<Arc<AttestationService<R>>>,
    Path(address): Path<String>,
) -> Json<VerificationView>
where
    R: VerificationRepository + 'static,
{
    Json(service.lookup(&address))
}

pub(crate) async fn mock_verify_handler<R>(
    State(service): State<Arc<AttestationService<R>>>,
    ValidatedJson(request): ValidatedJson<MockVerificationRequest>,
) -> Json<AttestationResponse>
where
    R: VerificationRepository + 'static,
{
    match service.mock_verify(request) {
        Ok(record) => Json(AttestationResponse::success(record.summary())),
        Err(err) => {
            error!(error = %err, "mock verification failed");
            Json(AttestationResponse::error(err.to_string()))
        }
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| {
            let essence = essence.trim().to_ascii_lowercase();
            essence == "application/json" || essence.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Bodies that are empty or not declared as JSON decode to an empty
/// submission; only a declared JSON body that fails to parse is an error.
fn decode_submission(headers: &HeaderMap, body: &[u8]) -> Result<AttestationSubmission, String> {
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AttestationSubmission::default());
    }

    serde_json::from_slice(body)
        .map_err(|err| format!("Failed to parse the request body as JSON: {err}"))
}
