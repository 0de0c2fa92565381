//! Log group - a named collection of streams sharing one retention setting

/// A log group as reported by the logging service
///
/// `retention_in_days` is `None` when the group never expires its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogGroup {
    /// Unique group name within the account
    pub name: String,

    /// Retention setting in days (`None` = never expire)
    pub retention_in_days: Option<i32>,
}

impl LogGroup {
    /// Create a group with the given name and retention
    pub fn new(name: impl Into<String>, retention_in_days: Option<i32>) -> Self {
        Self {
            name: name.into(),
            retention_in_days,
        }
    }
}
