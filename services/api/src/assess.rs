use clap::Args;
use kyc_mock::error::{AppError, VerificationError};
use kyc_mock::telemetry::redact_address;
use kyc_mock::verification::attestation::{
    AttestationService, InMemoryVerificationRepository, MockVerificationRequest,
    VerificationView,
};
use kyc_mock::verification::combined::{combine, CombinedAssessment};
use kyc_mock::verification::document::{DocumentRules, DocumentVerdict};
use kyc_mock::verification::profile::{ProfileAssessment, ProfileRules};
use serde::Serialize;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Wallet address to score; its last hex digit drives the synthetic profile
    #[arg(long)]
    pub(crate) user_address: String,
    /// Document identifier checked for FAKE/HIGH/MEDIUM markers
    #[arg(long)]
    pub(crate) document_id: String,
    #[arg(long, default_value = "passport")]
    pub(crate) document_type: String,
    /// Nationality recorded for the self-attestation (ISO 3166 alpha-3)
    #[arg(long)]
    pub(crate) nationality: Option<String>,
    #[arg(long)]
    pub(crate) age: Option<u32>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessmentReport {
    pub(crate) user_address: String,
    pub(crate) document_id: String,
    pub(crate) document_type: String,
    pub(crate) document: DocumentVerdict,
    pub(crate) profile: ProfileAssessment,
    pub(crate) attestation: VerificationView,
    pub(crate) combined: CombinedAssessment,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let as_json = args.json;
    let report = build_report(args)?;

    if as_json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                return Err(VerificationError::Internal(err.to_string()).into());
            }
        }
    } else {
        render_report(&report);
    }
    Ok(())
}

/// Run every component's scoring against a throwaway store and merge the
/// attestation and profile tracks.
pub(crate) fn build_report(args: AssessArgs) -> Result<AssessmentReport, AppError> {
    let AssessArgs {
        user_address,
        document_id,
        document_type,
        nationality,
        age,
        json: _,
    } = args;

    let document = DocumentRules::default().assess(&document_id);
    let profile = ProfileRules::default().assess(&user_address)?;

    let repository = Arc::new(InMemoryVerificationRepository::default());
    let service = AttestationService::new(repository);
    service
        .mock_verify(MockVerificationRequest {
            user_address: user_address.clone(),
            nationality,
            age: age.filter(|age| *age > 0),
        })
        .map_err(|err| VerificationError::Internal(err.to_string()))?;
    let attestation = service.lookup(&user_address);

    let combined = combine(&attestation, &profile);

    Ok(AssessmentReport {
        user_address,
        document_id,
        document_type,
        document,
        profile,
        attestation,
        combined,
    })
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn render_report(report: &AssessmentReport) {
    println!("Mock KYC assessment");
    println!(
        "User: {} | Document: {} ({})",
        redact_address(&report.user_address),
        report.document_id,
        report.document_type
    );

    println!("\nDocument check");
    println!(
        "  verified: {} | risk: {} | {}",
        yes_no(report.document.verified),
        report.document.risk_score,
        report.document.reason
    );

    println!("\nCredit/profile check");
    println!(
        "  verified: {} | credit score: {} | employment: {} | address verified: {} | risk: {}",
        yes_no(report.profile.verified),
        report.profile.credit_score,
        report.profile.employment_status.label(),
        yes_no(report.profile.address_verified),
        report.profile.risk_score
    );

    println!("\nSelf-attestation");
    println!(
        "  verified: {} | nationality: {} | local resident: {} | age: {} | risk: {}",
        yes_no(report.attestation.verified),
        report.attestation.nationality,
        yes_no(report.attestation.is_local_resident),
        report.attestation.age,
        report.attestation.risk_score
    );

    println!("\nCombined verdict");
    println!(
        "  method: {} | final verified: {} | total risk: {}",
        report.combined.method.label(),
        yes_no(report.combined.final_verified),
        report.combined.total_risk_score
    );
}
