use crate::assess::{run_assess, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand, ValueEnum};
use kyc_mock::error::AppError;
use std::fmt;

#[derive(Parser, Debug)]
#[command(
    name = "Mock KYC Verification Service",
    about = "Serve or exercise the deterministic mock KYC verification endpoints",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service for one component (default command)
    Serve(ServeArgs),
    /// Score a user locally across every component and print the combined verdict
    Assess(AssessArgs),
}

/// Independently deployable verification components.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Component {
    /// Bearer-protected document identifier scoring
    Document,
    /// Synthetic credit/profile scoring with CORS support
    Profile,
    /// Self-attestation store with lookup and mock endpoints
    #[default]
    Attestation,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Component::Document => "document",
            Component::Profile => "profile",
            Component::Attestation => "attestation",
        };
        f.write_str(label)
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Component to serve from this process
    #[arg(long, value_enum, default_value_t = Component::Attestation)]
    pub(crate) component: Component,
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
    }
}
