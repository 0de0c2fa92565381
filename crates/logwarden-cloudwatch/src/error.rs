//! Error types for CloudWatch Logs calls

use thiserror::Error;

/// A CloudWatch Logs call failed after the SDK's retries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CloudWatchError {
    /// DescribeLogGroups failed
    #[error("DescribeLogGroups failed: {0}")]
    DescribeLogGroups(String),

    /// DescribeLogStreams failed
    #[error("DescribeLogStreams failed: {0}")]
    DescribeLogStreams(String),

    /// PutRetentionPolicy failed
    #[error("PutRetentionPolicy failed: {0}")]
    PutRetentionPolicy(String),

    /// DeleteLogStream failed
    #[error("DeleteLogStream failed: {0}")]
    DeleteLogStream(String),

    /// DeleteLogGroup failed
    #[error("DeleteLogGroup failed: {0}")]
    DeleteLogGroup(String),
}
