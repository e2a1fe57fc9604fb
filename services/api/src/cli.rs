use crate::report::{run_metrics_report, run_snapshot_report, MetricsArgs, SnapshotArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use propdash::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Property Dashboard",
    about = "Serve and inspect portfolio metrics for the property management dashboard",
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
    /// Fetch a live snapshot from the configured backend and print it
    Snapshot(SnapshotArgs),
    /// Compute metrics from a local JSON export of the four collections
    Metrics(MetricsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
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
        Command::Snapshot(args) => run_snapshot_report(args).await,
        Command::Metrics(args) => run_metrics_report(args),
    }
}
