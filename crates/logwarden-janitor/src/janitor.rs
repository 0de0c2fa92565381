//! Core Janitor implementation: retention enforcement and stale stream cleanup

use crate::metrics::FailureKind;
use crate::paginator::{LogGroupPages, LogStreamPages, Paginator};
use crate::policy::{RetentionDecision, RetentionPolicy};
use crate::scan::{ScanControl, ScanVerdict, StaleScan};
use crate::{DeletionPolicy, JanitorConfig, JanitorError, JanitorMetrics, RateLimiter};
use chrono::{DateTime, Utc};
use logwarden_domain::{LogGroup, LogService, StreamOrder};
use tokio::time::Instant;

/// Current time in epoch milliseconds
fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// `YYYY-MM-DD` for an epoch-millisecond timestamp
fn format_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| millis.to_string())
}

/// Janitor enforcing the retention policy across an account
///
/// Responsible for:
/// - Setting the default retention on groups that have none
/// - Deleting streams (or whole groups) whose data is past retention
/// - Throttling every service call through one shared [`RateLimiter`]
/// - Isolating failures to the smallest unit and counting them
///
/// One group is processed start to finish before the next; pages are fetched
/// one at a time. Nothing runs in parallel.
///
/// # Examples
///
/// ```
/// use logwarden_janitor::{InMemoryLogService, Janitor, JanitorConfig};
/// use logwarden_domain::LogStream;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = InMemoryLogService::new()
///     .with_group("/aws/lambda/api", None, vec![LogStream::new("old", Some(0))]);
/// let mut janitor = Janitor::new(service, JanitorConfig::default())?;
///
/// let metrics = janitor.sweep().await?;
/// assert_eq!(metrics.retention_updates, 1);
/// assert_eq!(metrics.streams_deleted, 1);
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Janitor<S> {
    service: S,
    config: JanitorConfig,
    policy: RetentionPolicy,
    limiter: RateLimiter,
    metrics: JanitorMetrics,
}

impl<S: LogService> Janitor<S> {
    /// Create a Janitor over `service`
    ///
    /// # Errors
    ///
    /// Returns [`JanitorError::Config`] if the configuration is invalid.
    pub fn new(service: S, config: JanitorConfig) -> Result<Self, JanitorError> {
        config.validate()?;
        let limiter = RateLimiter::from_config(&config);
        Ok(Self {
            service,
            config,
            policy: RetentionPolicy::default(),
            limiter,
            metrics: JanitorMetrics::new(),
        })
    }

    /// The service the janitor talks to
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The active configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// The shared rate limiter
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Metrics of the last completed sweep
    pub fn metrics(&self) -> &JanitorMetrics {
        &self.metrics
    }

    /// Run one pass over every log group in the account
    ///
    /// # Errors
    ///
    /// Only a failure of the group listing itself is returned. Failures inside a
    /// group are logged, counted, and the sweep moves on to the next group.
    pub async fn sweep(&mut self) -> Result<JanitorMetrics, JanitorError> {
        self.sweep_at(now_millis()).await
    }

    /// Run one pass with `now_ms` as the current time
    pub async fn sweep_at(&mut self, now_ms: i64) -> Result<JanitorMetrics, JanitorError> {
        let start = Instant::now();
        let mut metrics = JanitorMetrics::new();

        if self.config.dry_run {
            tracing::info!("DRY RUN: no changes will be made");
        }

        let mut groups = Paginator::new(
            LogGroupPages::new(&self.service, self.config.page_size),
            &self.limiter,
        );

        while let Some(group) = groups
            .next()
            .await
            .map_err(|e| JanitorError::ListGroups(e.to_string()))?
        {
            metrics.groups_seen += 1;

            if let Err(err) = self.process_group(&group, now_ms, &mut metrics).await {
                tracing::error!("{}", err);
                if let Some(kind) = FailureKind::of(&err) {
                    metrics.record_failure(kind);
                }
            }
        }

        metrics.total_runtime_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "Sweep finished after {} group pages and {} service calls",
            groups.pages_fetched(),
            self.limiter.permits_issued()
        );

        self.metrics = metrics.clone();
        Ok(metrics)
    }

    /// Retention check, then cleanup, for a single group
    async fn process_group(
        &self,
        group: &LogGroup,
        now_ms: i64,
        metrics: &mut JanitorMetrics,
    ) -> Result<(), JanitorError> {
        if group.name.trim().is_empty() {
            tracing::warn!("Skipping log group without a name");
            metrics.groups_skipped += 1;
            return Ok(());
        }
        let name = group.name.as_str();

        match group.retention_in_days {
            Some(days) => tracing::info!("Log group {} (retention {} days)", name, days),
            None => tracing::info!("Log group {} (never expires)", name),
        }

        let decision = self.policy.evaluate(group.retention_in_days, now_ms);
        if decision.needs_update {
            self.apply_retention(name, decision.effective_days, metrics)
                .await?;
        }

        if self.config.is_excluded(name) {
            tracing::info!("Log group {} is excluded from cleanup", name);
            metrics.groups_excluded += 1;
            return Ok(());
        }

        tracing::debug!(
            "Streams of {} last ingested before {} are stale",
            name,
            format_date(decision.stale_cutoff_ms)
        );

        match self.config.deletion_policy {
            DeletionPolicy::PerStream => self.delete_stale_streams(name, &decision, metrics).await,
            DeletionPolicy::WholeGroup => {
                self.delete_obsolete_group(name, &decision, metrics).await
            }
        }
    }

    /// Set the default retention on a group that has none
    async fn apply_retention(
        &self,
        group: &str,
        days: i32,
        metrics: &mut JanitorMetrics,
    ) -> Result<(), JanitorError> {
        if self.config.dry_run {
            tracing::info!("DRY RUN: Would set retention of {} to {} days", group, days);
            metrics.dry_run_actions += 1;
            return Ok(());
        }

        self.limiter.acquire().await;
        self.service
            .put_retention_policy(group, days)
            .await
            .map_err(|e| JanitorError::UpdateRetention {
                group: group.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!("Updated retention of {} to {} days", group, days);
        metrics.retention_updates += 1;
        Ok(())
    }

    /// Per-stream policy: delete every stale stream, scanning the whole group
    async fn delete_stale_streams(
        &self,
        group: &str,
        decision: &RetentionDecision,
        metrics: &mut JanitorMetrics,
    ) -> Result<(), JanitorError> {
        let mut streams = Paginator::new(
            LogStreamPages::new(
                &self.service,
                group,
                self.config.page_size,
                StreamOrder::Unordered,
            ),
            &self.limiter,
        );

        while let Some(stream) = streams
            .next()
            .await
            .map_err(|e| list_streams_error(group, e))?
        {
            metrics.streams_scanned += 1;
            if decision.is_stale(stream.last_ingestion_time) {
                self.delete_stream(group, &stream.name, stream.last_ingestion_time, metrics)
                    .await;
            }
        }

        Ok(())
    }

    /// Whole-group policy: newest-first scan, then one group delete if all are stale
    async fn delete_obsolete_group(
        &self,
        group: &str,
        decision: &RetentionDecision,
        metrics: &mut JanitorMetrics,
    ) -> Result<(), JanitorError> {
        let mut scan = StaleScan::new(*decision);
        let mut streams = Paginator::new(
            LogStreamPages::new(
                &self.service,
                group,
                self.config.page_size,
                StreamOrder::NewestFirst,
            ),
            &self.limiter,
        );

        loop {
            let next = streams
                .next()
                .await
                .map_err(|e| list_streams_error(group, e))?;

            match next {
                Some(stream) => {
                    metrics.streams_scanned += 1;
                    if scan.observe(&stream) == ScanControl::Stop {
                        break;
                    }
                }
                None => {
                    scan.exhausted();
                    break;
                }
            }
        }

        match scan.verdict() {
            ScanVerdict::Keep => {
                tracing::debug!("Log group {} has nothing to clean", group);
            }
            ScanVerdict::DeleteStreams(stale) => {
                for stream in stale {
                    self.delete_stream(group, &stream.name, stream.last_ingestion_time, metrics)
                        .await;
                }
            }
            ScanVerdict::DeleteGroup { stale_streams } => {
                self.delete_group(group, stale_streams.len(), metrics).await;
            }
        }

        Ok(())
    }

    /// Delete one stream; failures are logged and counted, never returned
    async fn delete_stream(
        &self,
        group: &str,
        stream: &str,
        last_ingestion_time: Option<i64>,
        metrics: &mut JanitorMetrics,
    ) {
        let last_ingested = format_date(last_ingestion_time.unwrap_or(0));

        if self.config.dry_run {
            tracing::info!(
                "DRY RUN: Would delete log stream {} in {} (last ingestion {})",
                stream,
                group,
                last_ingested
            );
            metrics.dry_run_actions += 1;
            return;
        }

        self.limiter.acquire().await;
        match self.service.delete_log_stream(group, stream).await {
            Ok(()) => {
                tracing::info!(
                    "Deleted log stream {} in {} (last ingestion {})",
                    stream,
                    group,
                    last_ingested
                );
                metrics.streams_deleted += 1;
            }
            Err(e) => {
                let err = JanitorError::DeleteStream {
                    group: group.to_string(),
                    stream: stream.to_string(),
                    message: e.to_string(),
                };
                tracing::error!("{}", err);
                metrics.record_failure(FailureKind::DeleteStream);
            }
        }
    }

    /// Delete a whole group; failures are logged and counted, never returned
    async fn delete_group(&self, group: &str, stale_streams: usize, metrics: &mut JanitorMetrics) {
        if self.config.dry_run {
            tracing::info!(
                "DRY RUN: Would delete log group {} ({} stale streams)",
                group,
                stale_streams
            );
            metrics.dry_run_actions += 1;
            return;
        }

        self.limiter.acquire().await;
        match self.service.delete_log_group(group).await {
            Ok(()) => {
                tracing::info!("Deleted log group {} ({} stale streams)", group, stale_streams);
                metrics.groups_deleted += 1;
            }
            Err(e) => {
                let err = JanitorError::DeleteGroup {
                    group: group.to_string(),
                    message: e.to_string(),
                };
                tracing::error!("{}", err);
                metrics.record_failure(FailureKind::DeleteGroup);
            }
        }
    }
}

fn list_streams_error(group: &str, error: impl std::fmt::Display) -> JanitorError {
    JanitorError::ListStreams {
        group: group.to_string(),
        message: error.to_string(),
    }
}
