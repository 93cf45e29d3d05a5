use std::any::Any;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info};

use super::domain::{ProfileVerificationRequest, ProfileVerificationResponse};
use super::rules::ProfileRules;
use crate::error::{method_not_allowed, VerificationError};
use crate::extract::ValidatedJson;
use crate::telemetry::redact_address;
use crate::verification::cors::{apply_cors, PROFILE_CORS};
use crate::verification::iso_timestamp;

/// `OPTIONS /` preflight and `POST /` scoring, with CORS headers on every
/// response and panics converted into 500s.
pub fn profile_router(rules: Arc<ProfileRules>) -> Router {
    Router::new()
        .route(
            "/",
            post(verify_profile_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed),
        )
        .with_state(rules)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(PROFILE_CORS, apply_cors))
}

pub(crate) async fn verify_profile_handler(
    State(rules): State<Arc<ProfileRules>>,
    ValidatedJson(request): ValidatedJson<ProfileVerificationRequest>,
) -> Result<Json<ProfileVerificationResponse>, VerificationError> {
    let assessment = rules.assess(&request.user_address)?;

    info!(
        user = %redact_address(&request.user_address),
        credit_score = assessment.credit_score,
        employment = assessment.employment_status.label(),
        risk_score = assessment.risk_score,
        "profile verification completed"
    );

    Ok(Json(ProfileVerificationResponse::from_assessment(
        assessment,
        iso_timestamp(),
    )))
}

pub(crate) async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown fault".to_string()
    };

    error!(%details, "profile verification aborted");
    VerificationError::Internal(details).into_response()
}
