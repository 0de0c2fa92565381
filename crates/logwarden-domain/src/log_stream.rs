//! Log stream - a record of events inside a group

/// A log stream as reported by the logging service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStream {
    /// Stream name, unique within its group
    pub name: String,

    /// Last ingestion time in epoch milliseconds (`None` if nothing was ever ingested)
    pub last_ingestion_time: Option<i64>,
}

impl LogStream {
    /// Create a stream with the given name and last ingestion time
    pub fn new(name: impl Into<String>, last_ingestion_time: Option<i64>) -> Self {
        Self {
            name: name.into(),
            last_ingestion_time,
        }
    }

    /// Last ingestion time, with a missing value treated as the epoch
    pub fn last_ingestion_or_epoch(&self) -> i64 {
        self.last_ingestion_time.unwrap_or(0)
    }
}

/// Ordering requested from a stream listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamOrder {
    /// Whatever the service returns by default (name order)
    #[default]
    Unordered,

    /// Most recently active streams first
    NewestFirst,
}
