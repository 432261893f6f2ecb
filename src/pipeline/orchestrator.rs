use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, instrument};

use super::processing::dedup::{deduplicate, DedupKey};
use super::processing::enrich::{Enricher, LinkedInFallbackEnricher};
use super::processing::{categorize, lead_score, validate};
use crate::observability::metrics;
use crate::types::{DerivedFields, LeadBatch, LeadPriority, LeadRecord};

/// Counts reported alongside an enriched batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadSummary {
    pub total_leads: usize,
    pub valid_emails: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
    pub duplicates_removed: usize,
}

impl LeadSummary {
    /// Tally a processed batch. Records without derived fields are only counted in the total.
    pub fn from_batch(batch: &LeadBatch, duplicates_removed: usize) -> Self {
        let mut summary = LeadSummary {
            total_leads: batch.len(),
            duplicates_removed,
            ..Default::default()
        };

        for derived in batch.iter().filter_map(|record| record.derived.as_ref()) {
            if derived.valid_email {
                summary.valid_emails += 1;
            }
            match derived.lead_priority {
                LeadPriority::High => summary.high_priority += 1,
                LeadPriority::Medium => summary.medium_priority += 1,
                LeadPriority::Low => summary.low_priority += 1,
            }
        }

        summary
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub batch: LeadBatch,
    pub summary: LeadSummary,
}

/// Deduplicates a batch, then validates, enriches, scores and categorizes every record.
///
/// Holds only immutable settings, so one pipeline can serve independent batches
/// from several threads.
pub struct LeadPipeline {
    dedup_key: Option<DedupKey>,
    enricher: Box<dyn Enricher + Send + Sync>,
}

impl LeadPipeline {
    /// Create a pipeline with the default LinkedIn fallback enricher
    pub fn new(dedup_key: Option<DedupKey>) -> Self {
        Self {
            dedup_key,
            enricher: Box::new(LinkedInFallbackEnricher::new()),
        }
    }

    /// Create a pipeline with a custom enricher
    pub fn with_enricher(
        dedup_key: Option<DedupKey>,
        enricher: Box<dyn Enricher + Send + Sync>,
    ) -> Self {
        Self { dedup_key, enricher }
    }

    pub fn dedup_key(&self) -> Option<DedupKey> {
        self.dedup_key
    }

    /// Run the complete pipeline over a batch
    #[instrument(skip(self, batch), fields(records = batch.len(), dedup_key = ?self.dedup_key))]
    pub fn run(&self, batch: LeadBatch) -> PipelineResult {
        let started = Instant::now();
        metrics::pipeline::records_ingested(batch.len());

        // Deduplicate first: the per-record steps must see each lead once.
        let deduped = deduplicate(batch, self.dedup_key);
        metrics::pipeline::duplicates_removed(deduped.removed);
        if deduped.removed > 0 {
            info!("Removed {} duplicate leads", deduped.removed);
        } else {
            info!("No duplicates found");
        }

        let LeadBatch { headers, records } = deduped.batch;
        let records: Vec<LeadRecord> = records
            .into_iter()
            .map(|record| self.process_record(record))
            .collect();
        let batch = LeadBatch::new(headers, records);

        let summary = LeadSummary::from_batch(&batch, deduped.removed);
        metrics::pipeline::run_completed(&summary, started.elapsed().as_secs_f64());
        info!(
            total = summary.total_leads,
            valid_emails = summary.valid_emails,
            high_priority = summary.high_priority,
            "Pipeline finished"
        );

        PipelineResult { batch, summary }
    }

    /// Derive every field for a single record
    pub fn process_record(&self, mut record: LeadRecord) -> LeadRecord {
        let checks = validate::check_fields(
            record.owner_email.as_deref(),
            record.website.as_deref(),
            record.owner_phone.as_deref(),
        );

        self.enricher.enrich(&mut record);

        let lead_score = lead_score(
            &checks,
            record.revenue.as_deref(),
            record.employees_count.as_deref(),
        );
        let lead_priority = categorize(lead_score);
        metrics::pipeline::record_scored(lead_priority);

        debug!(
            company = record.company.as_deref().unwrap_or(""),
            lead_score,
            %lead_priority,
            "Scored lead"
        );

        record.derived = Some(DerivedFields {
            valid_email: checks.valid_email,
            free_email: checks.free_email,
            missing_website: checks.missing_website,
            missing_phone: checks.missing_phone,
            lead_score,
            lead_priority,
        });
        record
    }
}

impl Default for LeadPipeline {
    fn default() -> Self {
        Self::new(None)
    }
}
