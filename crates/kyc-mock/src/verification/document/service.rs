use std::time::Duration;

use tracing::info;

use super::domain::{DocumentVerificationRequest, DocumentVerificationResponse, DOCUMENT_PROVIDER};
use super::rules::DocumentRules;
use crate::telemetry::redact_address;
use crate::verification::iso_timestamp;

/// Scores document identifiers and emulates a provider's response latency.
#[derive(Debug, Clone)]
pub struct DocumentVerifier {
    rules: DocumentRules,
    processing_delay: Duration,
}

impl DocumentVerifier {
    pub fn new(rules: DocumentRules, processing_delay: Duration) -> Self {
        Self {
            rules,
            processing_delay,
        }
    }

    /// Score the request, then wait out the configured delay before answering.
    pub async fn verify(&self, request: DocumentVerificationRequest) -> DocumentVerificationResponse {
        let verdict = self.rules.assess(&request.document_id);

        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }

        info!(
            user = %redact_address(&request.user_address),
            document_type = %request.document_type,
            verified = verdict.verified,
            risk_score = verdict.risk_score,
            "document verification completed"
        );

        DocumentVerificationResponse {
            verified: verdict.verified,
            risk_score: verdict.risk_score,
            provider: DOCUMENT_PROVIDER.to_string(),
            reason: verdict.reason,
            timestamp: iso_timestamp(),
            user_address: request.user_address,
            document_type: request.document_type,
        }
    }
}
