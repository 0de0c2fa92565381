//! Logwarden CLI library.
//!
//! Configuration loading, the sweep entry point and summary formatting for the
//! `logwarden` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, OutputFormat, PolicyArg};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

use logwarden_domain::LogService;
use logwarden_janitor::{Janitor, JanitorConfig, JanitorMetrics};

/// Run one sweep over every log group the service lists.
///
/// Per-group failures are counted in the returned metrics; only a failed group
/// listing (or invalid settings) comes back as an error.
pub async fn sweep<S: LogService>(service: S, config: JanitorConfig) -> Result<JanitorMetrics> {
    let mut janitor = Janitor::new(service, config)?;
    Ok(janitor.sweep().await?)
}
