use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    AttestationSubmission, MockVerificationRequest, UserKey, VerificationRecord,
    VerificationView, ATTESTED_AGE, ATTESTED_RISK_SCORE, HOME_JURISDICTION, MOCK_ADULT_AGE,
    MOCK_BASE_RISK, MOCK_DEFAULT_AGE, MOCK_FOREIGN_RISK, MOCK_UNDERAGE_RISK,
};
use super::repository::{RepositoryError, VerificationRepository};
use crate::telemetry::redact_address;
use crate::verification::clamp_risk;

/// Self-attestation verifier backed by an injected verification store.
pub struct AttestationService<R> {
    repository: Arc<R>,
}

impl<R> AttestationService<R>
where
    R: VerificationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Accept an attestation. The proof is not checked: every submission
    /// yields the fixed home-jurisdiction verification, stored when the
    /// payload names a user.
    pub fn submit(
        &self,
        submission: AttestationSubmission,
    ) -> Result<VerificationRecord, AttestationServiceError> {
        let user = submission
            .user_context_data
            .filter(|value| !value.is_empty());

        let record = VerificationRecord {
            user_key: UserKey::normalize(user.as_deref().unwrap_or_default()),
            verified: true,
            nationality: HOME_JURISDICTION.to_string(),
            is_local_resident: true,
            age: ATTESTED_AGE,
            risk_score: ATTESTED_RISK_SCORE,
            timestamp: Utc::now().timestamp_millis(),
        };

        match user {
            Some(user) => {
                self.repository.upsert(record.clone())?;
                info!(
                    user = %redact_address(&user),
                    nationality = %record.nationality,
                    local = record.is_local_resident,
                    "attestation verified and stored"
                );
            }
            None => info!("attestation verified without user context; nothing stored"),
        }

        Ok(record)
    }

    /// Return the stored verification for `address`, or the unknown sentinel.
    pub fn lookup(&self, address: &str) -> VerificationView {
        let key = UserKey::normalize(address);
        match self.repository.fetch(&key) {
            Ok(Some(record)) => {
                info!(user = %redact_address(key.as_str()), "verification lookup hit");
                record.view()
            }
            Ok(None) => {
                info!(user = %redact_address(key.as_str()), "verification lookup miss");
                VerificationView::unknown()
            }
            Err(err) => {
                warn!(user = %redact_address(key.as_str()), error = %err, "verification lookup failed");
                VerificationView::unknown()
            }
        }
    }

    /// Store a caller-described verification, replacing any prior record.
    pub fn mock_verify(
        &self,
        request: MockVerificationRequest,
    ) -> Result<VerificationRecord, AttestationServiceError> {
        let MockVerificationRequest {
            user_address,
            nationality,
            age,
        } = request;

        // Residency is decided on the supplied nationality, before defaults.
        let is_local_resident = nationality.as_deref() == Some(HOME_JURISDICTION);

        let mut risk = MOCK_BASE_RISK;
        if !is_local_resident {
            risk += MOCK_FOREIGN_RISK;
        }
        if age.is_some_and(|age| age < MOCK_ADULT_AGE) {
            risk += MOCK_UNDERAGE_RISK;
        }

        let record = VerificationRecord {
            user_key: UserKey::normalize(&user_address),
            verified: true,
            nationality: nationality.unwrap_or_else(|| HOME_JURISDICTION.to_string()),
            is_local_resident,
            age: age.unwrap_or(MOCK_DEFAULT_AGE),
            risk_score: clamp_risk(risk),
            timestamp: Utc::now().timestamp_millis(),
        };

        self.repository.upsert(record.clone())?;
        info!(
            user = %redact_address(&user_address),
            nationality = %record.nationality,
            local = record.is_local_resident,
            risk_score = record.risk_score,
            "mock verification stored"
        );

        Ok(record)
    }

    pub fn stored_verifications(&self) -> Result<usize, AttestationServiceError> {
        Ok(self.repository.count()?)
    }
}

/// Error raised by the attestation service.
#[derive(Debug, thiserror::Error)]
pub enum AttestationServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::attestation::repository::InMemoryVerificationRepository;

    fn service() -> (
        AttestationService<InMemoryVerificationRepository>,
        Arc<InMemoryVerificationRepository>,
    ) {
        let repository = Arc::new(InMemoryVerificationRepository::default());
        (AttestationService::new(repository.clone()), repository)
    }

    fn mock(address: &str, nationality: Option<&str>, age: Option<u32>) -> MockVerificationRequest {
        MockVerificationRequest {
            user_address: address.to_string(),
            nationality: nationality.map(str::to_string),
            age,
        }
    }

    #[test]
    fn submit_stores_fixed_verification_under_normalized_key() {
        let (service, repository) = service();
        let record = service
            .submit(AttestationSubmission {
                user_context_data: Some("0xDEADBEEF".to_string()),
                ..AttestationSubmission::default()
            })
            .expect("submit succeeds");

        assert_eq!(record.nationality, "TWN");
        assert!(record.is_local_resident);
        assert_eq!(record.age, 30);
        assert_eq!(record.risk_score, 10);
        assert_eq!(repository.count().expect("count"), 1);
        assert_eq!(service.lookup("0xdeadbeef"), record.view());
    }

    #[test]
    fn submit_without_user_context_stores_nothing() {
        let (service, repository) = service();
        let record = service
            .submit(AttestationSubmission::default())
            .expect("submit succeeds");

        assert!(record.verified);
        assert_eq!(repository.count().expect("count"), 0);
    }

    #[test]
    fn lookup_of_unknown_user_returns_sentinel() {
        let (service, _) = service();
        assert_eq!(service.lookup("0xnever"), VerificationView::unknown());
    }

    #[test]
    fn mock_verify_scores_foreign_minors() {
        let (service, _) = service();
        let record = service
            .mock_verify(mock("0xAAA", Some("USA"), Some(19)))
            .expect("stored");

        assert!(!record.is_local_resident);
        assert_eq!(record.nationality, "USA");
        assert_eq!(record.age, 19);
        assert_eq!(record.risk_score, 35);
    }

    #[test]
    fn mock_verify_local_adult_has_base_risk() {
        let (service, _) = service();
        let record = service
            .mock_verify(mock("0xbbb", Some("TWN"), Some(40)))
            .expect("stored");

        assert!(record.is_local_resident);
        assert_eq!(record.risk_score, 10);
    }

    #[test]
    fn mock_verify_underage_penalty_stops_at_twenty_one() {
        let (service, _) = service();

        let twenty = service
            .mock_verify(mock("0x20", Some("TWN"), Some(20)))
            .expect("stored");
        assert_eq!(twenty.risk_score, 20);

        let twenty_one = service
            .mock_verify(mock("0x21", Some("TWN"), Some(21)))
            .expect("stored");
        assert_eq!(twenty_one.risk_score, 10);

        let foreign_twenty = service
            .mock_verify(mock("0x22", Some("USA"), Some(20)))
            .expect("stored");
        assert_eq!(foreign_twenty.risk_score, 35);
    }

    #[test]
    fn mock_verify_defaults_apply_after_residency_check() {
        let (service, _) = service();
        let record = service.mock_verify(mock("0xccc", None, None)).expect("stored");

        assert_eq!(record.nationality, "TWN");
        assert_eq!(record.age, 25);
        assert!(!record.is_local_resident);
        assert_eq!(record.risk_score, 25);
    }

    #[test]
    fn mock_verify_then_lookup_returns_stored_record() {
        let (service, _) = service();
        service
            .mock_verify(mock("0xMiXeD", Some("JPN"), Some(22)))
            .expect("stored");

        let view = service.lookup("0xmixed");
        assert!(view.verified);
        assert_eq!(view.nationality, "JPN");
        assert_eq!(view.age, 22);
        assert_eq!(view.risk_score, 25);
    }

    #[test]
    fn resubmission_overwrites_without_merging() {
        let (service, repository) = service();
        service
            .mock_verify(mock("0xddd", Some("USA"), Some(18)))
            .expect("stored");
        service
            .mock_verify(mock("0xDDD", Some("TWN"), None))
            .expect("replaced");

        let view = service.lookup("0xddd");
        assert_eq!(view.nationality, "TWN");
        assert_eq!(view.age, 25);
        assert!(view.is_local_resident);
        assert_eq!(view.risk_score, 10);
        assert_eq!(repository.count().expect("count"), 1);
        assert_eq!(service.stored_verifications().expect("count"), 1);
    }
}
