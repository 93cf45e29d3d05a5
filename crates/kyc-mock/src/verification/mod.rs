pub mod attestation;
pub mod combined;
pub mod cors;
pub mod document;
pub mod profile;

use chrono::{SecondsFormat, Utc};

/// Upper bound of every risk score emitted by the service.
pub const MAX_RISK_SCORE: u8 = 100;

/// Clamp an accumulated risk value into `0..=100`.
pub fn clamp_risk(score: i32) -> u8 {
    score.clamp(0, i32::from(MAX_RISK_SCORE)) as u8
}

/// Current instant as ISO-8601 UTC with millisecond precision.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
