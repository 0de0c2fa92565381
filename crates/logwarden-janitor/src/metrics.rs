//! Metrics collected during a Janitor run

use crate::JanitorError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Kind of failure isolated during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Listing a group's streams failed
    ListStreams,
    /// Setting a group's retention failed
    UpdateRetention,
    /// Deleting a stream failed
    DeleteStream,
    /// Deleting a group failed
    DeleteGroup,
}

impl FailureKind {
    /// Classify an isolated error (`None` for errors that abort the run)
    pub fn of(error: &JanitorError) -> Option<Self> {
        match error {
            JanitorError::ListStreams { .. } => Some(Self::ListStreams),
            JanitorError::UpdateRetention { .. } => Some(Self::UpdateRetention),
            JanitorError::DeleteStream { .. } => Some(Self::DeleteStream),
            JanitorError::DeleteGroup { .. } => Some(Self::DeleteGroup),
            JanitorError::ListGroups(_) | JanitorError::Config(_) => None,
        }
    }
}

/// Counters for one sweep over the account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JanitorMetrics {
    /// Groups returned by the group listing
    pub groups_seen: usize,

    /// Groups skipped for having no usable name
    pub groups_skipped: usize,

    /// Groups that only got the retention check
    pub groups_excluded: usize,

    /// Retention settings applied
    pub retention_updates: usize,

    /// Streams inspected
    pub streams_scanned: usize,

    /// Streams deleted one by one
    pub streams_deleted: usize,

    /// Groups deleted as a whole
    pub groups_deleted: usize,

    /// Mutating calls suppressed by dry-run mode
    pub dry_run_actions: usize,

    /// Isolated failures by kind
    pub failures: BTreeMap<FailureKind, usize>,

    /// Wall time of the run in milliseconds
    pub total_runtime_ms: u64,
}

impl JanitorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an isolated failure
    pub fn record_failure(&mut self, kind: FailureKind) {
        *self.failures.entry(kind).or_insert(0) += 1;
    }

    /// Total isolated failures
    pub fn total_failures(&self) -> usize {
        self.failures.values().sum()
    }

    /// Failures of one kind
    pub fn failures_of(&self, kind: FailureKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Logwarden Sweep Summary".to_string(),
            "=======================".to_string(),
            format!("Log groups: {}", self.groups_seen),
            format!("  Skipped (no name): {}", self.groups_skipped),
            format!("  Excluded from cleanup: {}", self.groups_excluded),
            format!("Retention updates: {}", self.retention_updates),
            format!("Streams scanned: {}", self.streams_scanned),
            format!("Streams deleted: {}", self.streams_deleted),
            format!("Groups deleted: {}", self.groups_deleted),
        ];

        if self.dry_run_actions > 0 {
            lines.push(format!("Dry-run actions skipped: {}", self.dry_run_actions));
        }

        if !self.failures.is_empty() {
            lines.push("Failures:".to_string());
            for (kind, count) in &self.failures {
                lines.push(format!("  {:?}: {}", kind, count));
            }
            lines.push(format!("  Total: {}", self.total_failures()));
        }

        lines.push(format!("Total runtime: {}ms", self.total_runtime_ms));
        lines.join("\n")
    }
}
