//! CSV ingestion of uploaded lead files.
//!
//! The whole file is read into memory as one `LeadBatch`. A file that lacks any
//! required column is rejected before a single row is read.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::constants;
use crate::error::{LeadError, Result};
use crate::types::{LeadBatch, LeadRecord};

/// Read a lead batch from any CSV source
pub fn read_leads<R: Read>(reader: R) -> Result<LeadBatch> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = normalize_headers(csv_reader.headers()?.iter());
    check_required_columns(&headers)?;

    // Derived columns are recomputed on every run; stale copies in the input are dropped.
    let derived = constants::derived_columns();
    let columns: Vec<(usize, &String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !derived.contains(&name.as_str()))
        .collect();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let mut record = LeadRecord::default();
        for (index, name) in &columns {
            let cell = row
                .get(*index)
                .filter(|value| !is_na_token(value))
                .map(str::to_string);
            record.set_field(name, cell);
        }
        records.push(record);
    }

    let kept_headers = columns.into_iter().map(|(_, name)| name.clone()).collect();
    debug!("Read {} lead rows", records.len());
    Ok(LeadBatch::new(kept_headers, records))
}

/// Read a lead batch from a CSV file on disk
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_leads_from_path<P: AsRef<Path>>(path: P) -> Result<LeadBatch> {
    let file = File::open(path.as_ref())?;
    let batch = read_leads(file)?;
    info!("Loaded {} leads", batch.len());
    Ok(batch)
}

fn is_na_token(value: &str) -> bool {
    constants::NA_TOKENS.contains(&value)
}

/// Trim header names and disambiguate repeats as `Name.1`, `Name.2`, ...
fn normalize_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.map(|name| {
        let name = name.trim_start_matches('\u{feff}').trim().to_string();
        let count = seen.entry(name.clone()).or_insert(0);
        let unique = if *count == 0 {
            name
        } else {
            format!("{}.{}", name, count)
        };
        *count += 1;
        unique
    })
    .collect()
}

fn check_required_columns(headers: &[String]) -> Result<()> {
    let missing: Vec<String> = constants::required_columns()
        .into_iter()
        .filter(|required| !headers.iter().any(|h| h.as_str() == *required))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        warn!("Rejecting upload, missing columns: {}", missing.join(", "));
        Err(LeadError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Company,Owner Email,Owner Phone,Website,Owner LinkedIn,Revenue,Employees Count";

    #[test]
    fn test_reads_rows_in_order() {
        let csv = format!(
            "{}\nAcme,a@acme.com,555,acme.com,,\"6,000 Cr\",20000\nBeta,,,,,,\n",
            HEADER
        );
        let batch = read_leads(csv.as_bytes()).unwrap();

        assert_eq!(batch.len(), 2);
        let acme = &batch.records[0];
        assert_eq!(acme.company.as_deref(), Some("Acme"));
        assert_eq!(acme.revenue.as_deref(), Some("6,000 Cr"));
        assert_eq!(acme.owner_linkedin, None);
        assert_eq!(batch.records[1].owner_email, None);
        assert!(batch.records.iter().all(|r| r.derived.is_none()));
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let csv = " Company , Owner Email ,Owner Phone,Website,Owner LinkedIn,Revenue, Employees Count\nAcme,,,,,,\n";
        let batch = read_leads(csv.as_bytes()).unwrap();
        assert_eq!(batch.headers[0], "Company");
        assert_eq!(batch.records[0].company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_whitespace_cells_stay_present() {
        let csv = format!("{}\nAcme,, ,  ,,,\n", HEADER);
        let batch = read_leads(csv.as_bytes()).unwrap();
        assert_eq!(batch.records[0].owner_phone.as_deref(), Some(" "));
        assert_eq!(batch.records[0].website.as_deref(), Some("  "));
    }

    #[test]
    fn test_na_tokens_read_as_absent() {
        let csv = format!(
            "{},Notes\nAcme,NULL,#N/A,N/A,N/A,nan,NA,None\n",
            HEADER
        );
        let batch = read_leads(csv.as_bytes()).unwrap();
        let record = &batch.records[0];
        assert_eq!(record.company.as_deref(), Some("Acme"));
        assert_eq!(record.owner_email, None);
        assert_eq!(record.owner_phone, None);
        assert_eq!(record.website, None);
        assert_eq!(record.owner_linkedin, None);
        assert_eq!(record.revenue, None);
        assert_eq!(record.employees_count, None);
        assert_eq!(record.field("Notes"), None);
    }

    #[test]
    fn test_na_match_is_exact() {
        let csv = format!("{}\nAcme,Na, N/A,n/A,NONE,,\n", HEADER);
        let batch = read_leads(csv.as_bytes()).unwrap();
        let record = &batch.records[0];
        assert_eq!(record.owner_email.as_deref(), Some("Na"));
        assert_eq!(record.owner_phone.as_deref(), Some(" N/A"));
        assert_eq!(record.website.as_deref(), Some("n/A"));
        assert_eq!(record.owner_linkedin.as_deref(), Some("NONE"));
    }

    #[test]
    fn test_missing_required_columns_are_all_reported() {
        let csv = "Company,Owner Email,Owner Phone,Owner LinkedIn,Employees Count\nAcme,,,,\n";
        match read_leads(csv.as_bytes()) {
            Err(LeadError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Website".to_string(), "Revenue".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_columns_and_short_rows() {
        let csv = format!("{},Industry\nAcme,a@acme.com\n", HEADER);
        let batch = read_leads(csv.as_bytes()).unwrap();
        assert_eq!(batch.headers.last().map(String::as_str), Some("Industry"));
        let record = &batch.records[0];
        assert_eq!(record.owner_email.as_deref(), Some("a@acme.com"));
        assert_eq!(record.field("Industry"), None);
        assert!(record.extra.contains_key("Industry"));
    }

    #[test]
    fn test_stale_derived_columns_are_dropped() {
        let csv = format!("{},Lead Score,Notes\nAcme,,,,,,,99,hi\n", HEADER);
        let batch = read_leads(csv.as_bytes()).unwrap();
        assert!(!batch.headers.iter().any(|h| h == "Lead Score"));
        assert_eq!(batch.records[0].field("Notes"), Some("hi"));
        assert!(!batch.records[0].extra.contains_key("Lead Score"));
    }

    #[test]
    fn test_duplicate_headers_are_disambiguated() {
        let headers = normalize_headers(["Notes", "Company", "Notes ", "Notes"].into_iter());
        assert_eq!(headers, vec!["Notes", "Company", "Notes.1", "Notes.2"]);
    }

    #[test]
    fn test_empty_input_is_malformed() {
        assert!(matches!(
            read_leads("".as_bytes()),
            Err(LeadError::MissingColumns(_))
        ));
    }
}
