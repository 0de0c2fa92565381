//! Error types for Janitor operations

use thiserror::Error;

/// Errors that can occur during Janitor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JanitorError {
    /// Listing the account's log groups failed
    #[error("Failed to list log groups: {0}")]
    ListGroups(String),

    /// Listing the streams of one group failed
    #[error("Failed to list streams of {group}: {message}")]
    ListStreams {
        /// Group being scanned
        group: String,
        /// Service error message
        message: String,
    },

    /// Setting a group's retention failed
    #[error("Failed to set retention on {group}: {message}")]
    UpdateRetention {
        /// Group being updated
        group: String,
        /// Service error message
        message: String,
    },

    /// Deleting a stream failed
    #[error("Failed to delete stream {stream} in {group}: {message}")]
    DeleteStream {
        /// Owning group
        group: String,
        /// Stream being deleted
        stream: String,
        /// Service error message
        message: String,
    },

    /// Deleting a whole group failed
    #[error("Failed to delete log group {group}: {message}")]
    DeleteGroup {
        /// Group being deleted
        group: String,
        /// Service error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
