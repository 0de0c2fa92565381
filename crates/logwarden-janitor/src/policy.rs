//! Retention policy evaluation
//!
//! Pure decision logic: no service calls, no clock reads.

use logwarden_domain::MILLIS_PER_DAY;

/// Retention assigned to groups that have none
pub const DEFAULT_RETENTION_DAYS: i32 = 14;

/// Outcome of evaluating one group's retention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionDecision {
    /// Retention the group has once the decision is applied
    pub effective_days: i32,

    /// Whether the group's retention must be set
    pub needs_update: bool,

    /// Streams last ingested before this instant (epoch ms) are stale
    pub stale_cutoff_ms: i64,
}

impl RetentionDecision {
    /// Whether a stream with this last ingestion time is stale
    ///
    /// A missing timestamp counts as the epoch, so such streams are always stale.
    pub fn is_stale(&self, last_ingestion_time: Option<i64>) -> bool {
        last_ingestion_time.unwrap_or(0) < self.stale_cutoff_ms
    }
}

/// Retention rules applied to every group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    default_days: i32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl RetentionPolicy {
    /// Decide the effective retention and stale cutoff for a group
    ///
    /// # Examples
    ///
    /// ```
    /// use logwarden_janitor::RetentionPolicy;
    ///
    /// let now = 1_700_000_000_000;
    /// let decision = RetentionPolicy::default().evaluate(None, now);
    /// assert_eq!(decision.effective_days, 14);
    /// assert!(decision.needs_update);
    /// assert_eq!(decision.stale_cutoff_ms, now - 14 * 86_400_000);
    /// ```
    pub fn evaluate(&self, current_days: Option<i32>, now_ms: i64) -> RetentionDecision {
        let (effective_days, needs_update) = match current_days {
            Some(days) if days > 0 => (days, false),
            _ => (self.default_days, true),
        };

        RetentionDecision {
            effective_days,
            needs_update,
            stale_cutoff_ms: now_ms - i64::from(effective_days) * MILLIS_PER_DAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_760_000_000_000;

    #[test]
    fn test_missing_retention_gets_default() {
        let decision = RetentionPolicy::default().evaluate(None, NOW);
        assert_eq!(
            decision,
            RetentionDecision {
                effective_days: 14,
                needs_update: true,
                stale_cutoff_ms: NOW - 14 * MILLIS_PER_DAY,
            }
        );
    }

    #[test]
    fn test_zero_retention_gets_default() {
        let decision = RetentionPolicy::default().evaluate(Some(0), NOW);
        assert_eq!(decision.effective_days, 14);
        assert!(decision.needs_update);
        assert_eq!(decision.stale_cutoff_ms, NOW - 14 * MILLIS_PER_DAY);
    }

    #[test]
    fn test_existing_retention_is_kept() {
        let decision = RetentionPolicy::default().evaluate(Some(7), NOW);
        assert_eq!(decision.effective_days, 7);
        assert!(!decision.needs_update);
        assert_eq!(decision.stale_cutoff_ms, NOW - 7 * MILLIS_PER_DAY);
    }

    #[test]
    fn test_negative_retention_is_treated_as_missing() {
        let decision = RetentionPolicy::default().evaluate(Some(-3), NOW);
        assert_eq!(decision.effective_days, 14);
        assert!(decision.needs_update);
    }

    #[test]
    fn test_long_retention_does_not_overflow() {
        let decision = RetentionPolicy::default().evaluate(Some(3653), NOW);
        assert_eq!(decision.stale_cutoff_ms, NOW - 3653 * MILLIS_PER_DAY);
    }

    #[test]
    fn test_staleness() {
        let decision = RetentionPolicy::default().evaluate(Some(14), NOW);
        assert!(decision.is_stale(Some(NOW - 20 * MILLIS_PER_DAY)));
        assert!(!decision.is_stale(Some(NOW - MILLIS_PER_DAY)));
        assert!(!decision.is_stale(Some(decision.stale_cutoff_ms)));
        assert!(decision.is_stale(None));
    }
}
