mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use seasonfix_scanner::{OrganizeError, OrganizeReport, Organizer};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_target(false)
        .init();

    let organizer = Organizer::new(&cli.root, cli.dry_run);
    info!(root = %organizer.root().display(), dry_run = cli.dry_run, "organizing");

    match organizer.organize() {
        Ok(report) => {
            print_report(&report, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(OrganizeError::Incomplete(failure)) => {
            print_report(&failure.report, cli.json)?;
            for e in &failure.config_errors {
                error!(series = %e.series, code = e.error.code(), error = %e.error, "invalid configuration");
            }
            if !failure.unresolved.is_empty() {
                error!(count = failure.unresolved.len(), "episode number not found in strict series");
                for path in &failure.unresolved {
                    eprintln!("  {}", path.display());
                }
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).with_context(|| format!("failed to organize {}", cli.root.display())),
    }
}

fn print_report(report: &OrganizeReport, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(report).context("failed to serialize report")?;
        println!("{out}");
    } else if report.dry_run {
        println!("would rename {} of {} files", report.renamed, report.scanned);
    } else {
        println!("renamed {} of {} files", report.renamed, report.scanned);
    }
    Ok(())
}
