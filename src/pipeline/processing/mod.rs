// Pipeline processing: deduplication, validation, enrichment, and scoring

pub mod categorize;
pub mod dedup;
pub mod enrich;
pub mod score;
pub mod validate;

// Re-export key types and functions
pub use categorize::categorize;
pub use dedup::{deduplicate, DedupKey, DedupOutcome};
pub use enrich::{Enricher, LinkedInFallbackEnricher};
pub use score::{employee_score, lead_score, revenue_score};
pub use validate::{is_free_email, is_missing, is_valid_email, FieldChecks};
