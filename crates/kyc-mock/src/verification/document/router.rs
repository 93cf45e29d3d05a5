use std::sync::Arc;

use axum::extract::{FromRef, State};
use axum::routing::post;
use axum::{Json, Router};

use super::domain::{DocumentVerificationRequest, DocumentVerificationResponse};
use super::service::DocumentVerifier;
use crate::auth::Authorized;
use crate::config::AuthConfig;
use crate::error::method_not_allowed;
use crate::extract::ValidatedJson;

/// Shared handler state for the document endpoint.
#[derive(Clone)]
pub struct DocumentState {
    pub verifier: Arc<DocumentVerifier>,
    pub auth: AuthConfig,
}

impl FromRef<DocumentState> for AuthConfig {
    fn from_ref(state: &DocumentState) -> Self {
        state.auth.clone()
    }
}

/// `POST /` guarded by the bearer key; other verbs answer 405.
pub fn document_router(verifier: Arc<DocumentVerifier>, auth: AuthConfig) -> Router {
    Router::new()
        .route(
            "/",
            post(verify_document_handler).fallback(method_not_allowed),
        )
        .with_state(DocumentState { verifier, auth })
}

pub(crate) async fn verify_document_handler(
    State(state): State<DocumentState>,
    _authorized: Authorized,
    ValidatedJson(request): ValidatedJson<DocumentVerificationRequest>,
) -> Json<DocumentVerificationResponse> {
    Json(state.verifier.verify(request).await)
}
