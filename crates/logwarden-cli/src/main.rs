//! Logwarden CLI - retention enforcement and stale stream cleanup for CloudWatch Logs.

use anyhow::Context;
use clap::Parser;
use logwarden_cli::{Cli, Config, Formatter};
use logwarden_cloudwatch::CloudWatchLogService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Progress lines go to stdout alongside the summary
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    config.apply_overrides(&cli);
    config.validate()?;

    let formatter = Formatter::new(cli.format, !cli.no_color);
    let dry_run = config.janitor.dry_run;

    let service = CloudWatchLogService::new(&config.aws).await;
    let metrics = logwarden_cli::sweep(service, config.janitor).await?;

    println!("{}", formatter.format_summary(&metrics, dry_run)?);
    Ok(())
}
