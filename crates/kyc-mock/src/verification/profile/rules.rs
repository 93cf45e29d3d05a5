use serde::{Deserialize, Serialize};

use crate::error::VerificationError;
use crate::verification::clamp_risk;

/// Synthetic employment categories cycled through by the address digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Student,
}

impl EmploymentStatus {
    pub const CYCLE: [EmploymentStatus; 4] = [
        EmploymentStatus::Employed,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Unemployed,
        EmploymentStatus::Student,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::Student => "student",
        }
    }
}

/// Risk added when the credit score falls below `below`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBand {
    pub below: u16,
    pub risk: u8,
}

/// Attributes derived from the final hex digit of a user address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticProfile {
    pub digit: u8,
    pub credit_score: u16,
    pub employment_status: EmploymentStatus,
    pub address_verified: bool,
}

/// Scored profile, independent of transport concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAssessment {
    pub verified: bool,
    pub credit_score: u16,
    pub employment_status: EmploymentStatus,
    pub address_verified: bool,
    pub risk_score: u8,
}

/// Thresholds and weights for the credit/profile rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRules {
    pub base_credit_score: u16,
    pub credit_step: u16,
    pub max_credit_score: u16,
    /// Checked in order; only the first matching band contributes.
    pub credit_bands: Vec<CreditBand>,
    pub unemployed_risk: u8,
    pub student_risk: u8,
    pub unverified_address_risk: u8,
    /// Digits strictly above this value count as a verified address.
    pub address_verified_above: u8,
    /// Profiles verify when the risk score is strictly below this value.
    pub verified_below: u8,
}

impl Default for ProfileRules {
    fn default() -> Self {
        Self {
            base_credit_score: 300,
            credit_step: 50,
            max_credit_score: 850,
            credit_bands: vec![
                CreditBand { below: 500, risk: 30 },
                CreditBand { below: 650, risk: 15 },
                CreditBand { below: 750, risk: 5 },
            ],
            unemployed_risk: 25,
            student_risk: 10,
            unverified_address_risk: 20,
            address_verified_above: 5,
            verified_below: 50,
        }
    }
}

impl ProfileRules {
    /// Derive the synthetic attributes for `user_address`.
    pub fn derive(&self, user_address: &str) -> Result<SyntheticProfile, VerificationError> {
        let digit = address_digit(user_address)?;

        let credit_score = self
            .credit_step
            .checked_mul(u16::from(digit))
            .and_then(|score| score.checked_add(self.base_credit_score))
            .ok_or_else(|| {
                VerificationError::Internal(format!(
                    "credit score overflow for digit {digit} (step {}, base {})",
                    self.credit_step, self.base_credit_score
                ))
            })?
            .min(self.max_credit_score);

        Ok(SyntheticProfile {
            digit,
            credit_score,
            employment_status: EmploymentStatus::CYCLE[usize::from(digit) % 4],
            address_verified: digit > self.address_verified_above,
        })
    }

    pub fn score(&self, profile: &SyntheticProfile) -> ProfileAssessment {
        let mut risk = self
            .credit_bands
            .iter()
            .find(|band| profile.credit_score < band.below)
            .map(|band| i32::from(band.risk))
            .unwrap_or(0);

        risk += match profile.employment_status {
            EmploymentStatus::Unemployed => i32::from(self.unemployed_risk),
            EmploymentStatus::Student => i32::from(self.student_risk),
            EmploymentStatus::Employed | EmploymentStatus::SelfEmployed => 0,
        };

        if !profile.address_verified {
            risk += i32::from(self.unverified_address_risk);
        }

        let risk_score = clamp_risk(risk);
        ProfileAssessment {
            verified: risk_score < self.verified_below,
            credit_score: profile.credit_score,
            employment_status: profile.employment_status,
            address_verified: profile.address_verified,
            risk_score,
        }
    }

    pub fn assess(&self, user_address: &str) -> Result<ProfileAssessment, VerificationError> {
        self.derive(user_address).map(|profile| self.score(&profile))
    }
}

fn address_digit(user_address: &str) -> Result<u8, VerificationError> {
    user_address
        .chars()
        .last()
        .and_then(|last| last.to_digit(16))
        .map(|digit| digit as u8)
        .ok_or_else(|| {
            VerificationError::invalid("user_address must end with a hexadecimal digit")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(address: &str) -> ProfileAssessment {
        ProfileRules::default()
            .assess(address)
            .expect("hex-terminated address")
    }

    #[test]
    fn address_ending_in_f_maxes_credit() {
        let assessment = assess("0x52908400098527886E0F7030069857D2E4169EEf");
        assert_eq!(assessment.credit_score, 850);
        assert_eq!(assessment.employment_status, EmploymentStatus::Student);
        assert!(assessment.address_verified);
        assert_eq!(assessment.risk_score, 10);
        assert!(assessment.verified);
    }

    #[test]
    fn address_ending_in_zero_is_risky() {
        let assessment = assess("0xabc0");
        assert_eq!(assessment.credit_score, 300);
        assert_eq!(assessment.employment_status, EmploymentStatus::Employed);
        assert!(!assessment.address_verified);
        assert_eq!(assessment.risk_score, 50);
        assert!(!assessment.verified);
    }

    #[test]
    fn unemployed_digit_accumulates_every_penalty() {
        // d = 2: credit 400, unemployed, address unverified.
        let assessment = assess("0x2");
        assert_eq!(assessment.credit_score, 400);
        assert_eq!(assessment.employment_status, EmploymentStatus::Unemployed);
        assert_eq!(assessment.risk_score, 75);
        assert!(!assessment.verified);
    }

    #[test]
    fn credit_bands_apply_only_the_first_match() {
        // d = 7: credit 650 lands in the <750 band only.
        let assessment = assess("..7");
        assert_eq!(assessment.credit_score, 650);
        assert_eq!(assessment.employment_status, EmploymentStatus::Student);
        assert!(assessment.address_verified);
        assert_eq!(assessment.risk_score, 15);
    }

    #[test]
    fn credit_band_edges_are_exclusive() {
        // d = 4: credit 500 misses the <500 band and takes the <650 one.
        let assessment = assess("0x4");
        assert_eq!(assessment.credit_score, 500);
        assert_eq!(assessment.employment_status, EmploymentStatus::Employed);
        assert!(!assessment.address_verified);
        assert_eq!(assessment.risk_score, 15 + 20);
        assert!(assessment.verified);

        // d = 9: credit 750 clears every band.
        let assessment = assess("0x9");
        assert_eq!(assessment.credit_score, 750);
        assert_eq!(assessment.employment_status, EmploymentStatus::SelfEmployed);
        assert!(assessment.address_verified);
        assert_eq!(assessment.risk_score, 0);
        assert!(assessment.verified);
    }

    #[test]
    fn uppercase_hex_digits_are_accepted() {
        assert_eq!(assess("0xB").credit_score, assess("0xb").credit_score);
    }

    #[test]
    fn credit_score_is_monotonic_and_bounded() {
        let mut previous = 0;
        for digit in "0123456789abcdef".chars() {
            let assessment = assess(&format!("0x{digit}"));
            assert!(assessment.credit_score >= previous);
            assert!(assessment.credit_score <= 850);
            assert!(assessment.risk_score <= 100);
            assert_eq!(assessment.verified, assessment.risk_score < 50);
            previous = assessment.credit_score;
        }
    }

    #[test]
    fn employment_cycles_by_digit_mod_four() {
        let rules = ProfileRules::default();
        for (digit, expected) in ["4", "5", "e", "f"]
            .iter()
            .zip(EmploymentStatus::CYCLE.iter())
        {
            let profile = rules.derive(digit).expect("hex digit");
            assert_eq!(profile.employment_status, *expected);
        }
    }

    #[test]
    fn non_hex_suffix_is_a_validation_error() {
        let rules = ProfileRules::default();
        assert!(matches!(
            rules.assess("0xzz"),
            Err(VerificationError::Validation { .. })
        ));
        assert!(matches!(
            rules.assess(""),
            Err(VerificationError::Validation { .. })
        ));
    }

    #[test]
    fn overflowing_rules_surface_internal_errors() {
        let rules = ProfileRules {
            credit_step: u16::MAX,
            ..ProfileRules::default()
        };
        assert!(matches!(
            rules.assess("0xf"),
            Err(VerificationError::Internal(_))
        ));
    }

    #[test]
    fn risk_is_clamped_for_aggressive_weights() {
        let rules = ProfileRules {
            unemployed_risk: 200,
            ..ProfileRules::default()
        };
        assert_eq!(rules.assess("0x2").expect("valid").risk_score, 100);
    }
}
