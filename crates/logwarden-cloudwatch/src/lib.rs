//! Logwarden CloudWatch Logs adapter
//!
//! Implements [`LogService`](logwarden_domain::LogService) against AWS CloudWatch Logs.
//! Uses the AWS SDK for Rust with the standard credential chain (environment, profile,
//! instance role, ...) and the SDK's standard retry mode for transient errors.

#![warn(missing_docs)]

mod client;
mod config;
mod error;

pub use client::CloudWatchLogService;
pub use config::CloudWatchConfig;
pub use error::CloudWatchError;
