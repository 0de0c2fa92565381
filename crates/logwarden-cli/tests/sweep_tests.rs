//! End-to-end runs of the CLI sweep entry point against the in-memory service

use clap::Parser;
use logwarden_cli::{sweep, Cli, CliError, Config, Formatter, OutputFormat};
use logwarden_domain::LogStream;
use logwarden_janitor::{InMemoryLogService, JanitorError};

// Far enough in the future to stay fresh whenever the test runs
const FRESH: i64 = 4_000_000_000_000;

const CONFIG: &str = r#"
[janitor]
requests_per_second = 100
excluded_groups = ["audit"]
"#;

fn service() -> InMemoryLogService {
    InMemoryLogService::new()
        .with_group(
            "app",
            None,
            vec![LogStream::new("old", Some(0)), LogStream::new("live", Some(FRESH))],
        )
        .with_group("audit", Some(365), vec![LogStream::new("ancient", Some(0))])
}

fn config_with(args: &[&str]) -> Config {
    let mut config = Config::parse(CONFIG).unwrap();
    let cli = Cli::parse_from(std::iter::once("logwarden").chain(args.iter().copied()));
    config.apply_overrides(&cli);
    config.validate().unwrap();
    config
}

#[tokio::test]
async fn test_sweep_per_stream() {
    let config = config_with(&[]);

    let metrics = sweep(service(), config.janitor).await.unwrap();

    assert_eq!(metrics.groups_seen, 2);
    assert_eq!(metrics.groups_excluded, 1);
    assert_eq!(metrics.retention_updates, 1);
    assert_eq!(metrics.streams_deleted, 1);
    assert_eq!(metrics.total_failures(), 0);
}

#[tokio::test]
async fn test_sweep_dry_run_flag() {
    let config = config_with(&["--dry-run"]);

    let metrics = sweep(service(), config.janitor).await.unwrap();

    assert_eq!(metrics.retention_updates, 0);
    assert_eq!(metrics.streams_deleted, 0);
    assert_eq!(metrics.dry_run_actions, 2);
}

#[tokio::test]
async fn test_sweep_exclude_flag() {
    let config = config_with(&["--exclude", "app"]);

    let metrics = sweep(service(), config.janitor).await.unwrap();

    assert_eq!(metrics.groups_excluded, 2);
    assert_eq!(metrics.streams_deleted, 0);
    assert_eq!(metrics.retention_updates, 1);
}

#[tokio::test]
async fn test_sweep_whole_group_flag() {
    let config = config_with(&["--policy", "whole-group"]);
    let service = InMemoryLogService::new().with_group(
        "retired",
        Some(7),
        vec![LogStream::new("a", Some(0)), LogStream::new("b", Some(0))],
    );

    let metrics = sweep(service, config.janitor).await.unwrap();

    assert_eq!(metrics.groups_deleted, 1);
    assert_eq!(metrics.streams_deleted, 0);
}

#[tokio::test]
async fn test_group_listing_failure_is_an_error() {
    let config = config_with(&[]);
    let service = InMemoryLogService::new().fail_list_groups();

    let result = sweep(service, config.janitor).await;

    assert!(matches!(
        result,
        Err(CliError::Janitor(JanitorError::ListGroups(_)))
    ));
}

#[tokio::test]
async fn test_summary_renders_json() {
    let config = config_with(&["--format", "json"]);
    let metrics = sweep(service(), config.janitor).await.unwrap();

    let output = Formatter::new(OutputFormat::Json, false)
        .format_summary(&metrics, false)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["streams_deleted"], 1);
    assert_eq!(value["groups_excluded"], 1);
}
