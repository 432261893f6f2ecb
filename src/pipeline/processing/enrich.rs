use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::constants::{LINKEDIN_SEARCH_BASE, LINKEDIN_SEARCH_SUFFIX};
use crate::types::LeadRecord;

/// Characters left bare in a query value: ASCII alphanumerics plus `-._~`
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Trait for filling in contextual fields on a lead before it is exported
pub trait Enricher {
    /// Enrich a record in place. Must not depend on scoring output.
    fn enrich(&self, record: &mut LeadRecord);
}

/// Replaces a blank `Owner LinkedIn` with a web search for the company's
/// LinkedIn page. The link is a search referral, not a verified profile.
#[derive(Debug, Clone, Default)]
pub struct LinkedInFallbackEnricher;

impl LinkedInFallbackEnricher {
    pub fn new() -> Self {
        Self
    }
}

impl Enricher for LinkedInFallbackEnricher {
    fn enrich(&self, record: &mut LeadRecord) {
        if is_blank(record.owner_linkedin.as_deref()) {
            record.owner_linkedin = Some(linkedin_search_url(record.company.as_deref()));
        }
    }
}

/// Build the fallback search link for a company, or an empty string when
/// there is no company name to search for.
pub fn linkedin_search_url(company: Option<&str>) -> String {
    match company {
        Some(name) if !name.trim().is_empty() => {
            let query = format!("{} {}", name, LINKEDIN_SEARCH_SUFFIX);
            let encoded = utf8_percent_encode(&query, QUERY_VALUE)
                .to_string()
                .replace("%20", "+");
            format!("{}{}", LINKEDIN_SEARCH_BASE, encoded)
        }
        _ => String::new(),
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
