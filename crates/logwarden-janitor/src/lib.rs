//! Logwarden Janitor
//!
//! Housekeeping job enforcing a log-retention policy across every log group of an account.
//!
//! # Overview
//!
//! The Janitor is responsible for:
//! - **Retention enforcement**: groups without a retention setting get 14 days
//! - **Stale stream cleanup**: streams last ingested before the group's cutoff are deleted
//! - **Whole-group cleanup**: optionally, groups whose every stream is stale are deleted
//!   in one call
//! - **Throttling**: every service call, listing or mutating, waits on one shared rate limiter
//!
//! # Architecture
//!
//! Leaves first:
//!
//! | Component | Module | Role |
//! |-----------|--------|------|
//! | Rate limiter | `limiter` | Bounds calls per second, fixed-interval or sliding-window |
//! | Paginator | `paginator` | Cursor-following listing, one permit per page |
//! | Retention policy | `policy` | Pure decision: effective retention and stale cutoff |
//! | Stale scan | `scan` | Newest-first state machine behind whole-group deletion |
//! | Janitor | `janitor` | The per-run control loop |
//!
//! Failures are isolated to the smallest unit: a failed deletion is logged and skipped,
//! a failed stream listing or retention update abandons that group only, and only a
//! failed group listing ends the run.
//!
//! # Usage
//!
//! ```no_run
//! use logwarden_janitor::{DeletionPolicy, InMemoryLogService, Janitor, JanitorConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = JanitorConfig {
//!     deletion_policy: DeletionPolicy::WholeGroup,
//!     dry_run: true,
//!     ..Default::default()
//! };
//! let mut janitor = Janitor::new(InMemoryLogService::new(), config)?;
//!
//! let metrics = janitor.sweep().await?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! The Janitor can be configured via TOML:
//!
//! ```toml
//! [janitor]
//! requests_per_second = 5
//! window_secs = 2
//! limiter = "fixed_interval"     # or "sliding_window"
//! page_size = 50
//! deletion_policy = "per_stream" # or "whole_group"
//! excluded_groups = ["/aws/lambda/audit"]
//! dry_run = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod janitor;
mod limiter;
mod memory;
mod metrics;
pub mod paginator;
pub mod policy;
pub mod scan;

pub use config::{DeletionPolicy, JanitorConfig, LimiterStrategy, MAX_PAGE_SIZE};
pub use error::JanitorError;
pub use janitor::Janitor;
pub use limiter::RateLimiter;
pub use memory::{InMemoryLogService, MemoryServiceError, ServiceCall};
pub use metrics::{FailureKind, JanitorMetrics};
pub use paginator::{LogGroupPages, LogStreamPages, PageSource, Paginator};
pub use policy::{RetentionDecision, RetentionPolicy, DEFAULT_RETENTION_DAYS};
pub use scan::{ScanControl, ScanState, ScanVerdict, StaleScan};
