use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::error::VerificationError;
use crate::extract::{present, ValidatedPayload};

pub const DOCUMENT_PROVIDER: &str = "mock-kyc-api";
pub const REQUIRED_DOCUMENT_FIELDS: [&str; 3] = ["user_address", "document_id", "document_type"];

/// Body as received on the wire; every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentPayload {
    #[serde(default)]
    pub user_address: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
}

/// Validated document verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentVerificationRequest {
    pub user_address: String,
    pub document_id: String,
    pub document_type: String,
}

impl ValidatedPayload for DocumentVerificationRequest {
    type Raw = DocumentPayload;

    fn validate(raw: Self::Raw) -> Result<Self, VerificationError> {
        match (
            present(raw.user_address),
            present(raw.document_id),
            present(raw.document_type),
        ) {
            (Some(user_address), Some(document_id), Some(document_type)) => Ok(Self {
                user_address,
                document_id,
                document_type,
            }),
            _ => Err(VerificationError::missing_fields(&REQUIRED_DOCUMENT_FIELDS)),
        }
    }

    fn rejected(_rejection: JsonRejection) -> VerificationError {
        VerificationError::missing_fields(&REQUIRED_DOCUMENT_FIELDS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVerificationResponse {
    pub verified: bool,
    pub risk_score: u8,
    pub provider: String,
    pub reason: String,
    pub timestamp: String,
    pub user_address: String,
    pub document_type: String,
}
