use crate::cli::Component;
use crate::infra::{component_router, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use kyc_mock::config::AppConfig;
use serde_json::json;

/// Component routes plus the readiness and metrics endpoints shared by every
/// process. The attestation component brings its own `/health`.
pub(crate) fn with_operational_routes(component: Component, config: &AppConfig) -> axum::Router {
    let router = component_router(component, config)
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint));

    match component {
        Component::Attestation => router,
        Component::Document | Component::Profile => router.route("/health", get(healthcheck)),
    }
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
