//! CSV export of processed batches and the priority-filtered view.

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument};

use crate::constants;
use crate::error::{LeadError, Result};
use crate::types::{DerivedFields, LeadBatch, LeadPriority, LeadRecord};

/// Which priority tier to show. Only meaningful after scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl PriorityFilter {
    pub fn matches(&self, record: &LeadRecord) -> bool {
        let wanted = match self {
            PriorityFilter::All => return true,
            PriorityFilter::High => LeadPriority::High,
            PriorityFilter::Medium => LeadPriority::Medium,
            PriorityFilter::Low => LeadPriority::Low,
        };
        record
            .derived
            .map_or(false, |derived| derived.lead_priority == wanted)
    }
}

impl FromStr for PriorityFilter {
    type Err = LeadError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PriorityFilter::All),
            "high" => Ok(PriorityFilter::High),
            "medium" => Ok(PriorityFilter::Medium),
            "low" => Ok(PriorityFilter::Low),
            other => Err(LeadError::Config(format!(
                "Unknown priority filter '{}' (expected all, high, medium or low)",
                other
            ))),
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PriorityFilter::All => "All",
            PriorityFilter::High => "High",
            PriorityFilter::Medium => "Medium",
            PriorityFilter::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Records of a processed batch matching the filter, in batch order
pub fn filter_by_priority(batch: &LeadBatch, filter: PriorityFilter) -> Vec<&LeadRecord> {
    batch.iter().filter(|record| filter.matches(record)).collect()
}

/// Write the full batch as CSV: input columns first, then the derived columns
pub fn write_leads<W: Write>(writer: W, batch: &LeadBatch) -> Result<()> {
    write_records(writer, &batch.headers, batch.iter())
}

/// Write a selection of records under the given input headers
pub fn write_records<'a, W, I>(writer: W, headers: &[String], records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a LeadRecord>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header_row: Vec<&str> = headers.iter().map(String::as_str).collect();
    header_row.extend(constants::derived_columns());
    csv_writer.write_record(&header_row)?;

    for record in records {
        let mut row: Vec<String> = headers
            .iter()
            .map(|column| record.field(column).unwrap_or_default().to_string())
            .collect();
        row.extend(derived_cells(record.derived.as_ref()));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the full batch to a file, creating parent directories as needed
#[instrument(skip(path, batch), fields(path = %path.as_ref().display(), records = batch.len()))]
pub fn write_leads_to_path<P: AsRef<Path>>(path: P, batch: &LeadBatch) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_leads(file, batch)?;
    info!("Wrote cleaned leads");
    Ok(())
}

fn derived_cells(derived: Option<&DerivedFields>) -> Vec<String> {
    match derived {
        Some(d) => vec![
            bool_cell(d.valid_email),
            bool_cell(d.free_email),
            bool_cell(d.missing_website),
            bool_cell(d.missing_phone),
            d.lead_score.to_string(),
            d.lead_priority.to_string(),
        ],
        None => vec![String::new(); constants::derived_columns().len()],
    }
}

fn bool_cell(value: bool) -> String {
    let label = if value { "True" } else { "False" };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(company: &str, score: i32, priority: LeadPriority) -> LeadRecord {
        LeadRecord {
            company: Some(company.to_string()),
            derived: Some(DerivedFields {
                valid_email: true,
                free_email: false,
                missing_website: false,
                missing_phone: true,
                lead_score: score,
                lead_priority: priority,
            }),
            ..Default::default()
        }
    }

    fn to_string(batch: &LeadBatch) -> String {
        let mut buffer = Vec::new();
        write_leads(&mut buffer, batch).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_appends_derived_columns() {
        let batch = LeadBatch::new(vec!["Company".to_string(), "Notes".to_string()], vec![]);
        assert_eq!(
            to_string(&batch),
            "Company,Notes,Valid Email,Free Email,Missing Website,Missing Phone,Lead Score,Lead Priority\n"
        );
    }

    #[test]
    fn test_row_rendering() {
        let mut record = scored("Acme, Inc", 3, LeadPriority::Medium);
        record.extra.insert("Notes".to_string(), None);
        let batch = LeadBatch::new(vec!["Company".to_string(), "Notes".to_string()], vec![record]);

        let output = to_string(&batch);
        let row = output.lines().nth(1).unwrap();
        assert_eq!(row, "\"Acme, Inc\",,True,False,False,True,3,Medium");
    }

    #[test]
    fn test_unprocessed_record_has_empty_derived_cells() {
        let record = LeadRecord {
            company: Some("Acme".to_string()),
            ..Default::default()
        };
        let batch = LeadBatch::new(vec!["Company".to_string()], vec![record]);
        assert_eq!(to_string(&batch).lines().nth(1), Some("Acme,,,,,,"));
    }

    #[test]
    fn test_filter_by_priority() {
        let batch = LeadBatch::new(
            vec!["Company".to_string()],
            vec![
                scored("A", 7, LeadPriority::High),
                scored("B", 4, LeadPriority::Medium),
                scored("C", 8, LeadPriority::High),
                LeadRecord::default(),
            ],
        );

        let high: Vec<_> = filter_by_priority(&batch, PriorityFilter::High)
            .into_iter()
            .map(|r| r.company.as_deref())
            .collect();
        assert_eq!(high, vec![Some("A"), Some("C")]);
        assert_eq!(filter_by_priority(&batch, PriorityFilter::Low).len(), 0);
        assert_eq!(filter_by_priority(&batch, PriorityFilter::All).len(), 4);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("High".parse::<PriorityFilter>().unwrap(), PriorityFilter::High);
        assert_eq!(" all ".parse::<PriorityFilter>().unwrap(), PriorityFilter::All);
        assert!("urgent".parse::<PriorityFilter>().is_err());
    }

    #[test]
    fn test_write_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("cleaned.csv");
        let batch = LeadBatch::new(vec!["Company".to_string()], vec![scored("A", 7, LeadPriority::High)]);

        write_leads_to_path(&path, &batch).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("A,True,False,False,True,7,High\n"));
    }
}
