//! Credit/profile verification: synthetic credit attributes keyed off the
//! user address, aggregated into a risk score.

pub mod domain;
pub mod router;
pub mod rules;

pub use domain::{
    ProfilePayload, ProfileVerificationRequest, ProfileVerificationResponse, PROFILE_PROVIDER,
    REQUIRED_PROFILE_FIELDS,
};
pub use router::profile_router;
pub use rules::{CreditBand, EmploymentStatus, ProfileAssessment, ProfileRules, SyntheticProfile};
