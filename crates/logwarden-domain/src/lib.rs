//! Logwarden Domain Layer
//!
//! This crate contains the data model shared by every Logwarden crate and the trait
//! describing the remote logging service. It carries no infrastructure code.
//!
//! ## Key Concepts
//!
//! - **Log group**: a named collection of log streams sharing a retention policy
//! - **Log stream**: an ordered record of log events, tracked by its last-ingestion time
//! - **Page**: one slice of a paginated listing plus the cursor for the next slice
//! - **LogService**: the five remote operations the janitor relies on
//!
//! ## Architecture
//!
//! - Pure data types and trait definitions only
//! - Infrastructure implementations live in other crates (`logwarden-cloudwatch`)
//! - The in-memory test double lives in `logwarden-janitor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod log_group;
pub mod log_stream;
pub mod page;
pub mod traits;

// Re-exports for convenience
pub use log_group::LogGroup;
pub use log_stream::{LogStream, StreamOrder};
pub use page::Page;
pub use traits::LogService;

/// Milliseconds in one day
pub const MILLIS_PER_DAY: i64 = 86_400_000;
