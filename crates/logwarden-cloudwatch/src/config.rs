//! Connection settings for CloudWatch Logs

use serde::{Deserialize, Serialize};

/// Configuration for the CloudWatch Logs client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudWatchConfig {
    /// AWS region (e.g., "eu-central-1"); the environment's region when unset
    pub region: Option<String>,

    /// Custom endpoint URL (useful for localstack testing)
    pub endpoint_url: Option<String>,

    /// Attempts per call, first try included, before an error surfaces
    /// Default: 3
    pub max_attempts: u32,
}

impl Default for CloudWatchConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint_url: None,
            max_attempts: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CloudWatchConfig::default();
        assert_eq!(config.region, None);
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn test_localstack_table() {
        let config: CloudWatchConfig = toml::from_str(
            r#"
region = "eu-west-1"
endpoint_url = "http://localhost:4566"
max_attempts = 5
"#,
        )
        .unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.max_attempts, 5);
    }

    #[test]
    fn test_from_toml() {
        let config: CloudWatchConfig = toml::from_str(r#"region = "us-east-1""#).unwrap();
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.max_attempts, 3);
    }
}
