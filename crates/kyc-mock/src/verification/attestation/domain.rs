use std::fmt;

use axum::extract::rejection::JsonRejection;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::VerificationError;
use crate::extract::{present, ValidatedPayload};

/// Nationality treated as local residency.
pub const HOME_JURISDICTION: &str = "TWN";
pub const UNKNOWN_NATIONALITY: &str = "UNKNOWN";
/// Risk reported for users with no stored verification.
pub const UNKNOWN_RISK_SCORE: u8 = 50;

pub const ATTESTED_AGE: u32 = 30;
pub const ATTESTED_RISK_SCORE: u8 = 10;

pub const MOCK_DEFAULT_AGE: u32 = 25;
pub const MOCK_BASE_RISK: i32 = 10;
pub const MOCK_FOREIGN_RISK: i32 = 15;
pub const MOCK_UNDERAGE_RISK: i32 = 10;
pub const MOCK_ADULT_AGE: u32 = 21;

/// Lower-cased user identifier; the store's only key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserKey(String);

impl UserKey {
    pub fn normalize(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored verification for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub user_key: UserKey,
    pub verified: bool,
    pub nationality: String,
    pub is_local_resident: bool,
    pub age: u32,
    pub risk_score: u8,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl VerificationRecord {
    pub fn view(&self) -> VerificationView {
        VerificationView {
            verified: self.verified,
            nationality: self.nationality.clone(),
            is_local_resident: self.is_local_resident,
            age: self.age,
            risk_score: self.risk_score,
        }
    }

    pub fn summary(&self) -> VerificationSummary {
        VerificationSummary {
            nationality: self.nationality.clone(),
            is_local_resident: self.is_local_resident,
            risk_score: self.risk_score,
        }
    }
}

/// Lookup response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationView {
    pub verified: bool,
    pub nationality: String,
    pub is_local_resident: bool,
    pub age: u32,
    pub risk_score: u8,
}

impl VerificationView {
    /// Sentinel returned when no record exists for the user.
    pub fn unknown() -> Self {
        Self {
            verified: false,
            nationality: UNKNOWN_NATIONALITY.to_string(),
            is_local_resident: false,
            age: 0,
            risk_score: UNKNOWN_RISK_SCORE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub nationality: String,
    pub is_local_resident: bool,
    pub risk_score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttestationStatus {
    Success,
    Error,
}

/// Body returned by the submit and mock-verify endpoints. Failures are
/// reported in-band with `status: "error"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationResponse {
    pub status: AttestationStatus,
    pub result: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_summary: Option<VerificationSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AttestationResponse {
    pub fn success(summary: VerificationSummary) -> Self {
        Self {
            status: AttestationStatus::Success,
            result: true,
            verification_summary: Some(summary),
            reason: None,
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: AttestationStatus::Error,
            result: false,
            verification_summary: None,
            reason: Some(reason.into()),
        }
    }
}

/// Proof-shaped attestation payload. The proof material is carried but not
/// checked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationSubmission {
    #[serde(default)]
    pub attestation_id: Option<Value>,
    #[serde(default)]
    pub proof: Option<Value>,
    #[serde(default)]
    pub public_signals: Option<Value>,
    #[serde(default)]
    pub user_context_data: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MockVerificationPayload {
    #[serde(default)]
    pub user_address: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    /// Accepts whole or fractional numbers and numeric strings.
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<u32>,
}

fn lenient_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(raw)) if raw.trim().is_empty() => return Ok(None),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        Some(Value::Number(number)) => number.as_f64(),
        Some(_) => None,
    };

    match number {
        Some(age) if age.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&age) => {
            // For non-negative ages, trunc(age) < 21 exactly when age < 21.
            Ok(Some(age.trunc() as u32))
        }
        _ => Err(D::Error::custom("age must be a non-negative number")),
    }
}

/// Manual verification request used by demos and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockVerificationRequest {
    pub user_address: String,
    pub nationality: Option<String>,
    pub age: Option<u32>,
}

impl ValidatedPayload for MockVerificationRequest {
    type Raw = MockVerificationPayload;

    fn validate(raw: Self::Raw) -> Result<Self, VerificationError> {
        let user_address = present(raw.user_address)
            .ok_or_else(|| VerificationError::invalid("user_address required"))?;
        Ok(Self {
            user_address,
            nationality: present(raw.nationality),
            // An age of zero is indistinguishable from "not supplied".
            age: raw.age.filter(|age| *age > 0),
        })
    }

    fn rejected(rejection: JsonRejection) -> VerificationError {
        VerificationError::invalid(format!("invalid mock verification body: {}", rejection.body_text()))
    }
}
