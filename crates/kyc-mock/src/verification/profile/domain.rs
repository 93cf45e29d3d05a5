use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use super::rules::{EmploymentStatus, ProfileAssessment};
use crate::error::VerificationError;
use crate::extract::{present, ValidatedPayload};

pub const PROFILE_PROVIDER: &str = "MockKYC";
pub const REQUIRED_PROFILE_FIELDS: [&str; 2] = ["user_address", "document_id"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePayload {
    #[serde(default)]
    pub user_address: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
}

/// Validated credit/profile request. Only `user_address` drives scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileVerificationRequest {
    pub user_address: String,
    pub document_id: String,
    pub document_type: Option<String>,
}

impl ValidatedPayload for ProfileVerificationRequest {
    type Raw = ProfilePayload;

    fn validate(raw: Self::Raw) -> Result<Self, VerificationError> {
        match (present(raw.user_address), present(raw.document_id)) {
            (Some(user_address), Some(document_id)) => Ok(Self {
                user_address,
                document_id,
                document_type: present(raw.document_type),
            }),
            _ => Err(VerificationError::missing_fields(&REQUIRED_PROFILE_FIELDS)),
        }
    }

    fn rejected(_rejection: JsonRejection) -> VerificationError {
        VerificationError::missing_fields(&REQUIRED_PROFILE_FIELDS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileVerificationResponse {
    pub verified: bool,
    pub credit_score: u16,
    pub employment_status: EmploymentStatus,
    pub address_verified: bool,
    pub risk_score: u8,
    pub provider: String,
    pub timestamp: String,
}

impl ProfileVerificationResponse {
    pub fn from_assessment(assessment: ProfileAssessment, timestamp: String) -> Self {
        Self {
            verified: assessment.verified,
            credit_score: assessment.credit_score,
            employment_status: assessment.employment_status,
            address_verified: assessment.address_verified,
            risk_score: assessment.risk_score,
            provider: PROFILE_PROVIDER.to_string(),
            timestamp,
        }
    }
}
