//! Output formatting for the final sweep summary.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::*;
use logwarden_janitor::JanitorMetrics;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Render the metrics of a finished sweep.
    pub fn format_summary(&self, metrics: &JanitorMetrics, dry_run: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(metrics)?),
            OutputFormat::Text => Ok(self.format_summary_table(metrics, dry_run)),
        }
    }

    fn format_summary_table(&self, metrics: &JanitorMetrics, dry_run: bool) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Count"]);

        let mut rows = vec![
            ("Log groups", metrics.groups_seen),
            ("Skipped (no name)", metrics.groups_skipped),
            ("Excluded", metrics.groups_excluded),
            ("Retention updates", metrics.retention_updates),
            ("Streams scanned", metrics.streams_scanned),
            ("Streams deleted", metrics.streams_deleted),
            ("Groups deleted", metrics.groups_deleted),
        ];
        if dry_run {
            rows.push(("Dry-run actions", metrics.dry_run_actions));
        }
        for (label, count) in rows {
            builder.push_record([label.to_string(), count.to_string()]);
        }
        for (kind, count) in &metrics.failures {
            builder.push_record([format!("Failed {:?}", kind), count.to_string()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let status = self.status_line(metrics, dry_run);
        format!("{}\n{}", table, status)
    }

    fn status_line(&self, metrics: &JanitorMetrics, dry_run: bool) -> String {
        let prefix = if dry_run { "Dry run complete" } else { "Sweep complete" };
        let failures = metrics.total_failures();
        let message = format!("{} in {}ms", prefix, metrics.total_runtime_ms);

        if failures == 0 {
            self.success(&message)
        } else {
            self.warning(&format!("{} with {} failure(s)", message, failures))
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logwarden_janitor::FailureKind;

    fn sample_metrics() -> JanitorMetrics {
        let mut metrics = JanitorMetrics::new();
        metrics.groups_seen = 3;
        metrics.retention_updates = 1;
        metrics.streams_scanned = 12;
        metrics.streams_deleted = 4;
        metrics.total_runtime_ms = 2_500;
        metrics
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_summary(&sample_metrics(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["groups_seen"], 3);
        assert_eq!(value["streams_deleted"], 4);
    }

    #[test]
    fn test_text_format() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_summary(&sample_metrics(), false).unwrap();
        assert!(output.contains("Streams deleted"));
        assert!(output.contains("Retention updates"));
        assert!(!output.contains("Dry-run actions"));
        assert!(output.ends_with("✓ Sweep complete in 2500ms"));
    }

    #[test]
    fn test_text_format_with_failures() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let mut metrics = sample_metrics();
        metrics.record_failure(FailureKind::DeleteStream);
        metrics.record_failure(FailureKind::DeleteStream);

        let output = formatter.format_summary(&metrics, true).unwrap();
        assert!(output.contains("Failed DeleteStream"));
        assert!(output.contains("Dry-run actions"));
        assert!(output.ends_with("⚠ Dry run complete in 2500ms with 2 failure(s)"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
