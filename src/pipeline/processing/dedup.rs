use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::constants;
use crate::error::LeadError;
use crate::types::{LeadBatch, LeadRecord};

/// Identity used to decide that two records describe the same lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DedupKey {
    Company,
    OwnerEmail,
    OwnerPhone,
    /// Composite of `Company` and `Owner Email`
    CompanyOwnerEmail,
}

impl DedupKey {
    pub fn all() -> [DedupKey; 4] {
        [
            DedupKey::Company,
            DedupKey::OwnerEmail,
            DedupKey::OwnerPhone,
            DedupKey::CompanyOwnerEmail,
        ]
    }

    /// Column names that make up this key
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            DedupKey::Company => &[constants::COMPANY],
            DedupKey::OwnerEmail => &[constants::OWNER_EMAIL],
            DedupKey::OwnerPhone => &[constants::OWNER_PHONE],
            DedupKey::CompanyOwnerEmail => &[constants::COMPANY, constants::OWNER_EMAIL],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DedupKey::Company => "company",
            DedupKey::OwnerEmail => "owner-email",
            DedupKey::OwnerPhone => "owner-phone",
            DedupKey::CompanyOwnerEmail => "company-owner-email",
        }
    }

    /// Raw key value for a record. Absent cells stay `None`, so absent matches absent.
    pub fn extract(&self, record: &LeadRecord) -> Vec<Option<String>> {
        self.columns()
            .iter()
            .map(|column| record.field(column).map(str::to_string))
            .collect()
    }

    /// Parse a user-supplied selection, where `none` disables deduplication
    pub fn parse_selection(value: &str) -> Result<Option<DedupKey>, LeadError> {
        match value.trim() {
            "" | "none" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl FromStr for DedupKey {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DedupKey::all()
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                LeadError::Config(format!(
                    "Unknown dedup key '{}' (expected one of: company, owner-email, owner-phone, company-owner-email, none)",
                    s
                ))
            })
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Batch reduced to one record per key value
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    pub batch: LeadBatch,
    pub removed: usize,
}

/// Keep the first record for each distinct key value, preserving upload order.
///
/// With no key selected the batch is returned unchanged.
pub fn deduplicate(batch: LeadBatch, key: Option<DedupKey>) -> DedupOutcome {
    let Some(key) = key else {
        return DedupOutcome { batch, removed: 0 };
    };

    let LeadBatch { headers, records } = batch;
    let before = records.len();
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(before);

    let kept: Vec<LeadRecord> = records
        .into_iter()
        .filter(|record| seen.insert(key.extract(record)))
        .collect();

    let removed = before - kept.len();
    debug!(dedup_key = %key, before, removed, "Deduplicated batch");

    DedupOutcome {
        batch: LeadBatch::new(headers, kept),
        removed,
    }
}
