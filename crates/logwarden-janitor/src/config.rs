//! Configuration for Janitor operations
//!
//! Defines the request rate, page size, deletion policy and exclusion list.
//! The retention applied to groups without one is a fixed constant
//! ([`DEFAULT_RETENTION_DAYS`](crate::DEFAULT_RETENTION_DAYS)), not configuration.

use crate::JanitorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Largest page the logging service accepts for stream listings
pub const MAX_PAGE_SIZE: i32 = 50;

/// How stale streams are removed from a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionPolicy {
    /// Delete each stale stream on its own and scan every stream
    #[default]
    PerStream,

    /// Scan newest-first and delete the whole group when every stream is stale
    WholeGroup,
}

/// Which throttling strategy the rate limiter uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimiterStrategy {
    /// Evenly spaced calls based on the time of the last call
    #[default]
    FixedInterval,

    /// Spacing plus a cap on calls inside a rolling window
    SlidingWindow,
}

/// Configuration for the Janitor
///
/// # Examples
///
/// ```
/// use logwarden_janitor::{DeletionPolicy, JanitorConfig};
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.requests_per_second, 5);
/// assert_eq!(config.page_size, 50);
/// assert_eq!(config.deletion_policy, DeletionPolicy::PerStream);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JanitorConfig {
    /// Maximum calls per second against the logging service
    /// Default: 5 (the DescribeLogStreams / DeleteLogStream quota)
    pub requests_per_second: u32,

    /// Rolling window used by the sliding-window limiter (in seconds)
    /// Default: 2
    pub window_secs: u64,

    /// Throttling strategy
    pub limiter: LimiterStrategy,

    /// Page size for group and stream listings
    /// Default: 50
    pub page_size: i32,

    /// Per-stream or whole-group deletion
    pub deletion_policy: DeletionPolicy,

    /// Groups that get the retention check but are never cleaned
    pub excluded_groups: BTreeSet<String>,

    /// Dry-run mode: list everything, mutate nothing
    pub dry_run: bool,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 5,
            window_secs: 2,
            limiter: LimiterStrategy::FixedInterval,
            page_size: MAX_PAGE_SIZE,
            deletion_policy: DeletionPolicy::PerStream,
            excluded_groups: BTreeSet::new(),
            dry_run: false,
        }
    }
}

impl JanitorConfig {
    /// Check the values the limiter and paginators depend on
    pub fn validate(&self) -> Result<(), JanitorError> {
        if self.requests_per_second == 0 {
            return Err(JanitorError::Config(
                "requests_per_second must be greater than zero".to_string(),
            ));
        }
        if self.window_secs == 0 {
            return Err(JanitorError::Config(
                "window_secs must be greater than zero".to_string(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(JanitorError::Config(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        Ok(())
    }

    /// Minimum spacing between two calls
    pub fn min_interval(&self) -> Duration {
        Duration::from_secs(1) / self.requests_per_second.max(1)
    }

    /// Rolling window as Duration
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Whether `group` is in the exclusion set
    pub fn is_excluded(&self, group: &str) -> bool {
        self.excluded_groups.contains(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JanitorConfig::default();
        assert_eq!(config.requests_per_second, 5);
        assert_eq!(config.window_secs, 2);
        assert_eq!(config.limiter, LimiterStrategy::FixedInterval);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.deletion_policy, DeletionPolicy::PerStream);
        assert!(config.excluded_groups.is_empty());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_duration_conversions() {
        let config = JanitorConfig::default();
        assert_eq!(config.min_interval(), Duration::from_millis(200));
        assert_eq!(config.window(), Duration::from_secs(2));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = JanitorConfig {
            requests_per_second: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = JanitorConfig {
            window_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = JanitorConfig {
            page_size: 51,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(JanitorError::Config(_))));
    }

    #[test]
    fn test_exclusion() {
        let mut config = JanitorConfig::default();
        config.excluded_groups.insert("/keep/me".to_string());
        assert!(config.is_excluded("/keep/me"));
        assert!(!config.is_excluded("/other"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: JanitorConfig = toml::from_str(
            r#"
            deletion_policy = "whole_group"
            limiter = "sliding_window"
            excluded_groups = ["/aws/lambda/audit"]
            "#,
        )
        .unwrap();

        assert_eq!(config.deletion_policy, DeletionPolicy::WholeGroup);
        assert_eq!(config.limiter, LimiterStrategy::SlidingWindow);
        assert!(config.is_excluded("/aws/lambda/audit"));
        assert_eq!(config.requests_per_second, 5);
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = JanitorConfig {
            dry_run: true,
            ..Default::default()
        };
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: JanitorConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }
}
