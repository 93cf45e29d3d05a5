use crate::cli::Component;
use kyc_mock::config::AppConfig;
use kyc_mock::verification::attestation::{
    attestation_router, AttestationService, InMemoryVerificationRepository,
};
use kyc_mock::verification::document::{document_router, DocumentRules, DocumentVerifier};
use kyc_mock::verification::profile::{profile_router, ProfileRules};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the selected component with its collaborators. Each call builds a
/// fresh attestation store.
pub(crate) fn component_router(component: Component, config: &AppConfig) -> axum::Router {
    match component {
        Component::Document => {
            let verifier = Arc::new(DocumentVerifier::new(
                DocumentRules::default(),
                config.document.processing_delay,
            ));
            document_router(verifier, config.auth.clone())
        }
        Component::Profile => profile_router(Arc::new(ProfileRules::default())),
        Component::Attestation => {
            let repository = Arc::new(InMemoryVerificationRepository::default());
            attestation_router(Arc::new(AttestationService::new(repository)))
        }
    }
}
