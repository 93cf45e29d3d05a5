//! Document verification: scores a document identifier against a marker table.

pub mod domain;
pub mod router;
pub mod rules;
pub mod service;

pub use domain::{
    DocumentPayload, DocumentVerificationRequest, DocumentVerificationResponse, DOCUMENT_PROVIDER,
    REQUIRED_DOCUMENT_FIELDS,
};
pub use router::{document_router, DocumentState};
pub use rules::{DocumentMarker, DocumentRules, DocumentVerdict};
pub use service::DocumentVerifier;
