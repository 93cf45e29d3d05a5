//! Self-attestation verification backed by an in-memory store.
//!
//! Each user key moves from "no record" to "verified" and never back; a later
//! submission for the same key replaces the record wholesale.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    AttestationResponse, AttestationStatus, AttestationSubmission, MockVerificationPayload,
    MockVerificationRequest, UserKey, VerificationRecord, VerificationSummary, VerificationView,
    HOME_JURISDICTION, UNKNOWN_NATIONALITY,
};
pub use repository::{InMemoryVerificationRepository, RepositoryError, VerificationRepository};
pub use router::{attestation_router, SERVICE_NAME};
pub use service::{AttestationService, AttestationServiceError};
