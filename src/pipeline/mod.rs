// Lead processing pipeline: per-record processing steps and the batch orchestrator

pub mod orchestrator;
pub mod processing;

// Re-export key types from each stage
pub use orchestrator::{LeadPipeline, LeadSummary, PipelineResult};
pub use processing::DedupKey;
