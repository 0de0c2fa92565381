//! Command-line argument parsing.

use clap::Parser;
use logwarden_janitor::DeletionPolicy;
use std::path::PathBuf;

/// Logwarden - enforce retention and remove stale log streams in CloudWatch Logs.
#[derive(Debug, Parser)]
#[command(name = "logwarden")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "LOGWARDEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// List everything but skip retention updates and deletions
    #[arg(long)]
    pub dry_run: bool,

    /// How stale streams are removed
    #[arg(short, long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Log group to leave untouched (repeatable)
    #[arg(short, long = "exclude", value_name = "GROUP")]
    pub exclude: Vec<String>,

    /// AWS region
    #[arg(long)]
    pub region: Option<String>,

    /// Custom CloudWatch Logs endpoint (e.g. LocalStack)
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Format of the final summary
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Deletion policy argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyArg {
    /// Delete stale streams one by one
    PerStream,
    /// Delete a group once every stream in it is stale
    WholeGroup,
}

/// Summary format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Text,
    /// JSON metrics
    Json,
}

impl From<PolicyArg> for DeletionPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::PerStream => DeletionPolicy::PerStream,
            PolicyArg::WholeGroup => DeletionPolicy::WholeGroup,
        }
    }
}
