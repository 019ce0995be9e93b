use crate::demo::{run_demo, run_evidence_report, DemoArgs, EvidenceReportArgs};
use crate::server;
use case_evidence::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Case Evidence Service",
    about = "Resolve immigration evidence checklists from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Resolve evidence requirements for a case snapshot
    Evidence {
        #[command(subcommand)]
        command: EvidenceCommand,
    },
    /// Walk a sample marriage-based case through several document uploads
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum EvidenceCommand {
    /// Print a readiness report for a JSON case snapshot
    Report(EvidenceReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Preload the in-memory stores with the demo case
    #[arg(long)]
    pub(crate) seed_demo: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evidence {
            command: EvidenceCommand::Report(args),
        } => run_evidence_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
