use crate::infra::portfolio_service;
use chrono::Local;
use clap::Args;
use propdash::config::AppConfig;
use propdash::error::AppError;
use propdash::portfolio::{MetricsSnapshot, RawPortfolio};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SnapshotArgs {
    /// Print the raw JSON snapshot instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MetricsArgs {
    /// JSON file with `properties`, `tenants`, `tasks` and `reminders` payloads
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the metrics as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_snapshot_report(args: SnapshotArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = portfolio_service(&config)?;
    let snapshot = service.snapshot().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let title = format!(
        "Portfolio snapshot from {} ({})",
        config.backend.base_url,
        Local::now().format("%Y-%m-%d %H:%M")
    );
    print!(
        "{}",
        render_metrics_report(&title, &snapshot.metrics, &snapshot.error_summary)
    );
    Ok(())
}

pub(crate) fn run_metrics_report(args: MetricsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let file = std::fs::File::open(&args.input)?;
    let raw: RawPortfolio = serde_json::from_reader(std::io::BufReader::new(file))?;
    let metrics = propdash::portfolio::compute_metrics_with(&raw, &config.estimation);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    let title = format!("Portfolio metrics from {}", args.input.display());
    print!("{}", render_metrics_report(&title, &metrics, ""));
    Ok(())
}

pub(crate) fn render_metrics_report(
    title: &str,
    metrics: &MetricsSnapshot,
    error_summary: &str,
) -> String {
    let mut out = String::new();
    let financials = &metrics.financials;
    let formatted = financials.formatted();
    let occupancy = &metrics.occupancy;

    let _ = writeln!(out, "{title}");
    let _ = writeln!(
        out,
        "- {} properties | {} tenants | {} tasks | {} reminders",
        metrics.property_count, metrics.tenant_count, metrics.task_count, metrics.reminder_count
    );

    let _ = writeln!(
        out,
        "\nFinancials (monthly{})",
        if financials.estimated { ", estimated" } else { "" }
    );
    let _ = writeln!(out, "- Revenue: {}", formatted.revenue);
    let _ = writeln!(out, "- Expenses: {}", formatted.expenses);
    let _ = writeln!(out, "- Net: {}", formatted.net);

    let _ = writeln!(
        out,
        "\nOccupancy{}",
        if occupancy.estimated { " (estimated)" } else { "" }
    );
    let _ = writeln!(
        out,
        "- {} rented / {} vacant of {} ({}% occupied, {}% vacant)",
        occupancy.rented, occupancy.vacant, occupancy.total, occupancy.rate, occupancy.vacancy_rate
    );
    if occupancy.unknown > 0 {
        let _ = writeln!(out, "- {} without a recognizable status", occupancy.unknown);
    }

    if !error_summary.is_empty() {
        let _ = writeln!(out, "\nData issues\n- {error_summary}");
    }

    out
}
