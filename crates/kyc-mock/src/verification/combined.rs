//! Dual-track verdict merging a self-attestation view with a credit/profile
//! assessment, as consumed by downstream oracles.

use serde::{Deserialize, Serialize};

use super::attestation::VerificationView;
use super::clamp_risk;
use super::profile::{EmploymentStatus, ProfileAssessment};

/// Weights applied to the attestation and profile risk scores, in percent.
pub const ATTESTATION_WEIGHT_PCT: u32 = 40;
pub const PROFILE_WEIGHT_PCT: u32 = 60;
pub const LOCAL_RESIDENT_DISCOUNT: u8 = 10;
pub const FOREIGN_RESIDENT_SURCHARGE: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationMethod {
    DualVerified,
    SelfOnly,
    TraditionalOnly,
    Unverified,
}

impl VerificationMethod {
    pub fn label(&self) -> &'static str {
        match self {
            VerificationMethod::DualVerified => "DUAL_VERIFIED",
            VerificationMethod::SelfOnly => "SELF_ONLY",
            VerificationMethod::TraditionalOnly => "TRADITIONAL_ONLY",
            VerificationMethod::Unverified => "UNVERIFIED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedAssessment {
    pub self_verified: bool,
    pub traditional_verified: bool,
    pub final_verified: bool,
    pub total_risk_score: u8,
    pub nationality: String,
    pub is_local_resident: bool,
    pub credit_score: u16,
    pub employment_status: EmploymentStatus,
    pub address_verified: bool,
    pub method: VerificationMethod,
}

fn weighted(score: u8, weight_pct: u32) -> u32 {
    u32::from(score) * weight_pct / 100
}

pub fn combine(attestation: &VerificationView, profile: &ProfileAssessment) -> CombinedAssessment {
    let mut total = weighted(attestation.risk_score, ATTESTATION_WEIGHT_PCT)
        + weighted(profile.risk_score, PROFILE_WEIGHT_PCT);

    if attestation.is_local_resident {
        if total > u32::from(LOCAL_RESIDENT_DISCOUNT) {
            total -= u32::from(LOCAL_RESIDENT_DISCOUNT);
        }
    } else {
        total += u32::from(FOREIGN_RESIDENT_SURCHARGE);
    }

    let method = match (attestation.verified, profile.verified) {
        (true, true) => VerificationMethod::DualVerified,
        (true, false) => VerificationMethod::SelfOnly,
        (false, true) => VerificationMethod::TraditionalOnly,
        (false, false) => VerificationMethod::Unverified,
    };

    CombinedAssessment {
        self_verified: attestation.verified,
        traditional_verified: profile.verified,
        final_verified: attestation.verified && profile.verified,
        total_risk_score: clamp_risk(i32::try_from(total).unwrap_or(i32::MAX)),
        nationality: attestation.nationality.clone(),
        is_local_resident: attestation.is_local_resident,
        credit_score: profile.credit_score,
        employment_status: profile.employment_status,
        address_verified: profile.address_verified,
        method,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::profile::ProfileRules;

    fn local_attestation() -> VerificationView {
        VerificationView {
            verified: true,
            nationality: "TWN".to_string(),
            is_local_resident: true,
            age: 30,
            risk_score: 10,
        }
    }

    fn profile(address: &str) -> ProfileAssessment {
        ProfileRules::default().assess(address).expect("valid address")
    }

    #[test]
    fn dual_verified_local_resident_gets_discount() {
        // 10 * 0.4 = 4, 10 * 0.6 = 6, minus the local discount only when above 10.
        let combined = combine(&local_attestation(), &profile("0xf"));
        assert_eq!(combined.method, VerificationMethod::DualVerified);
        assert!(combined.final_verified);
        assert_eq!(combined.total_risk_score, 10);

        // 10 * 0.4 = 4, 15 * 0.6 = 9 -> 13 - 10.
        let combined = combine(&local_attestation(), &profile("0x7"));
        assert_eq!(combined.total_risk_score, 3);
    }

    #[test]
    fn unknown_attestation_is_traditional_only_with_surcharge() {
        // 50 * 0.4 = 20, 10 * 0.6 = 6, plus 15 for a non-resident.
        let combined = combine(&VerificationView::unknown(), &profile("0xf"));
        assert_eq!(combined.method, VerificationMethod::TraditionalOnly);
        assert!(!combined.final_verified);
        assert_eq!(combined.total_risk_score, 41);
        assert_eq!(combined.nationality, "UNKNOWN");
    }

    #[test]
    fn method_reflects_each_track() {
        let risky = profile("0x2");
        assert_eq!(
            combine(&local_attestation(), &risky).method,
            VerificationMethod::SelfOnly
        );
        assert_eq!(
            combine(&VerificationView::unknown(), &risky).method,
            VerificationMethod::Unverified
        );
    }

    #[test]
    fn totals_never_exceed_the_risk_ceiling() {
        let attestation = VerificationView {
            risk_score: 100,
            ..VerificationView::unknown()
        };
        let profile = ProfileAssessment {
            risk_score: 100,
            ..profile("0x0")
        };
        assert_eq!(combine(&attestation, &profile).total_risk_score, 100);
    }

    #[test]
    fn method_labels_match_serialized_form() {
        let value = serde_json::to_value(VerificationMethod::SelfOnly).expect("json");
        assert_eq!(value, serde_json::json!(VerificationMethod::SelfOnly.label()));
    }
}
