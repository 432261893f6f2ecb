use crate::constants;
use std::collections::BTreeMap;
use std::fmt;

/// A single sales lead as uploaded, plus the fields the pipeline derives for it.
///
/// An empty or NA-token input cell is stored as `None`; any other text is kept verbatim
/// (whitespace-only values included) so validators see exactly what was uploaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadRecord {
    pub company: Option<String>,
    pub owner_email: Option<String>,
    pub owner_phone: Option<String>,
    pub website: Option<String>,
    pub owner_linkedin: Option<String>,
    pub revenue: Option<String>,
    pub employees_count: Option<String>,
    /// Columns outside the lead schema, carried through untouched
    pub extra: BTreeMap<String, Option<String>>,
    /// Populated by the pipeline; `None` until the record has been processed
    pub derived: Option<DerivedFields>,
}

impl LeadRecord {
    /// Look up a cell by its (trimmed) column name
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            constants::COMPANY => self.company.as_deref(),
            constants::OWNER_EMAIL => self.owner_email.as_deref(),
            constants::OWNER_PHONE => self.owner_phone.as_deref(),
            constants::WEBSITE => self.website.as_deref(),
            constants::OWNER_LINKEDIN => self.owner_linkedin.as_deref(),
            constants::REVENUE => self.revenue.as_deref(),
            constants::EMPLOYEES_COUNT => self.employees_count.as_deref(),
            other => self.extra.get(other).and_then(|v| v.as_deref()),
        }
    }

    /// Store a cell by column name, routing unknown columns into `extra`
    pub fn set_field(&mut self, column: &str, value: Option<String>) {
        match column {
            constants::COMPANY => self.company = value,
            constants::OWNER_EMAIL => self.owner_email = value,
            constants::OWNER_PHONE => self.owner_phone = value,
            constants::WEBSITE => self.website = value,
            constants::OWNER_LINKEDIN => self.owner_linkedin = value,
            constants::REVENUE => self.revenue = value,
            constants::EMPLOYEES_COUNT => self.employees_count = value,
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }
}

/// Fields computed by the pipeline for every processed record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedFields {
    pub valid_email: bool,
    pub free_email: bool,
    pub missing_website: bool,
    pub missing_phone: bool,
    pub lead_score: i32,
    pub lead_priority: LeadPriority,
}

/// Follow-up tier assigned from the lead score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadPriority {
    High,
    Medium,
    Low,
}

impl LeadPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadPriority::High => "High",
            LeadPriority::Medium => "Medium",
            LeadPriority::Low => "Low",
        }
    }
}

impl fmt::Display for LeadPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered batch of leads sharing one header row.
///
/// `headers` keeps the input column order (trimmed) so export can reproduce it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadBatch {
    pub headers: Vec<String>,
    pub records: Vec<LeadRecord>,
}

impl LeadBatch {
    pub fn new(headers: Vec<String>, records: Vec<LeadRecord>) -> Self {
        Self { headers, records }
    }

    /// A batch with just the required lead columns as its header row
    pub fn with_default_headers(records: Vec<LeadRecord>) -> Self {
        let headers = constants::required_columns()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { headers, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LeadRecord> {
        self.records.iter()
    }
}
