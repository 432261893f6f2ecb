//! Metrics for the lead pipeline
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! embedding application installs a recorder, so these calls are cheap no-ops
//! in the CLI.

use std::fmt;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    RecordsIngested,
    DuplicatesRemoved,
    RecordsScored,
    ValidEmails,
    RunDuration,
    RunsCompleted,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::RecordsIngested => "lead_cleaner_records_ingested_total",
            MetricName::DuplicatesRemoved => "lead_cleaner_duplicates_removed_total",
            MetricName::RecordsScored => "lead_cleaner_records_scored_total",
            MetricName::ValidEmails => "lead_cleaner_valid_emails_total",
            MetricName::RunDuration => "lead_cleaner_run_duration_seconds",
            MetricName::RunsCompleted => "lead_cleaner_runs_completed_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod pipeline {
    use super::MetricName;
    use crate::pipeline::LeadSummary;
    use crate::types::LeadPriority;

    /// Record the size of an incoming batch
    pub fn records_ingested(count: usize) {
        ::metrics::counter!(MetricName::RecordsIngested.as_str()).increment(count as u64);
    }

    pub fn duplicates_removed(count: usize) {
        ::metrics::counter!(MetricName::DuplicatesRemoved.as_str()).increment(count as u64);
    }

    /// Record one scored lead under its priority label
    pub fn record_scored(priority: LeadPriority) {
        ::metrics::counter!(
            MetricName::RecordsScored.as_str(),
            "priority" => priority.as_str()
        )
        .increment(1);
    }

    /// Record the totals of a finished run
    pub fn run_completed(summary: &LeadSummary, duration_secs: f64) {
        ::metrics::counter!(MetricName::ValidEmails.as_str())
            .increment(summary.valid_emails as u64);
        ::metrics::counter!(MetricName::RunsCompleted.as_str()).increment(1);
        ::metrics::histogram!(MetricName::RunDuration.as_str()).record(duration_secs);
    }
}
