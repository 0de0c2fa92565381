//! Configuration file loading and flag overrides.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use logwarden_cloudwatch::CloudWatchConfig;
use logwarden_janitor::JanitorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of the TOML configuration file.
///
/// ```toml
/// [janitor]
/// requests_per_second = 5
/// deletion_policy = "whole_group"
/// excluded_groups = ["/aws/lambda/audit"]
///
/// [aws]
/// region = "eu-central-1"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sweep settings
    pub janitor: JanitorConfig,

    /// CloudWatch Logs connection
    pub aws: CloudWatchConfig,
}

impl Config {
    /// Load configuration from the given file, or defaults when no file is named.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file '{}' does not exist",
                        path.display()
                    )));
                }
                let contents = fs::read_to_string(path)?;
                Self::parse(&contents)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply command-line overrides on top of the file values.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if cli.dry_run {
            self.janitor.dry_run = true;
        }
        if let Some(policy) = cli.policy {
            self.janitor.deletion_policy = policy.into();
        }
        self.janitor
            .excluded_groups
            .extend(cli.exclude.iter().cloned());
        if let Some(region) = &cli.region {
            self.aws.region = Some(region.clone());
        }
        if let Some(endpoint_url) = &cli.endpoint_url {
            self.aws.endpoint_url = Some(endpoint_url.clone());
        }
    }

    /// Check the combined settings before any call is made.
    pub fn validate(&self) -> Result<()> {
        self.janitor.validate()?;
        if self.aws.max_attempts == 0 {
            return Err(CliError::Config("aws.max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}
