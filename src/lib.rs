pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod ingest;
pub mod observability;
pub mod pipeline;
pub mod types;

pub use error::{LeadError, Result};
pub use pipeline::{DedupKey, LeadPipeline, LeadSummary, PipelineResult};
pub use types::{DerivedFields, LeadBatch, LeadPriority, LeadRecord};
