//! Trait definitions for external interactions
//!
//! These traits define the boundary between the janitor and the logging service.
//! Infrastructure implementations live in other crates.

use crate::{LogGroup, LogStream, Page, StreamOrder};
use async_trait::async_trait;

/// The remote logging service
///
/// Implemented by the infrastructure layer (logwarden-cloudwatch) and by the
/// in-memory double in logwarden-janitor. Every operation is idempotent, so a
/// partially applied run is repaired by the next one.
#[async_trait]
pub trait LogService: Send + Sync {
    /// Error type for service operations
    type Error: std::fmt::Display + Send + Sync;

    /// List one page of log groups in the account
    async fn list_log_groups(
        &self,
        cursor: Option<String>,
        page_size: i32,
    ) -> Result<Page<LogGroup>, Self::Error>;

    /// List one page of streams inside `group`
    async fn list_log_streams(
        &self,
        group: &str,
        cursor: Option<String>,
        page_size: i32,
        order: StreamOrder,
    ) -> Result<Page<LogStream>, Self::Error>;

    /// Set the retention of `group` to `days`
    async fn put_retention_policy(&self, group: &str, days: i32) -> Result<(), Self::Error>;

    /// Delete a single stream
    async fn delete_log_stream(&self, group: &str, stream: &str) -> Result<(), Self::Error>;

    /// Delete a group together with all of its streams
    async fn delete_log_group(&self, group: &str) -> Result<(), Self::Error>;
}
