//! Mock KYC verification endpoints: document scoring, synthetic credit
//! profiles and a self-attestation store, each exposed as an axum router.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod telemetry;
pub mod verification;
