/// Column names shared by ingestion, the pipeline and export.
/// Input headers are matched against these after trimming surrounding whitespace.

// Input columns every uploaded batch must carry
pub const COMPANY: &str = "Company";
pub const OWNER_EMAIL: &str = "Owner Email";
pub const OWNER_PHONE: &str = "Owner Phone";
pub const WEBSITE: &str = "Website";
pub const OWNER_LINKEDIN: &str = "Owner LinkedIn";
pub const REVENUE: &str = "Revenue";
pub const EMPLOYEES_COUNT: &str = "Employees Count";

// Derived columns appended by the pipeline, in export order
pub const VALID_EMAIL: &str = "Valid Email";
pub const FREE_EMAIL: &str = "Free Email";
pub const MISSING_WEBSITE: &str = "Missing Website";
pub const MISSING_PHONE: &str = "Missing Phone";
pub const LEAD_SCORE: &str = "Lead Score";
pub const LEAD_PRIORITY: &str = "Lead Priority";

/// Cell contents read as a missing value. Matched exactly, without trimming or case folding.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Consumer mail providers; an address on one of these domains is a "free" email.
pub const FREE_EMAIL_DOMAINS: [&str; 4] = ["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

/// Fallback search reference used when a lead has no LinkedIn profile
pub const LINKEDIN_SEARCH_BASE: &str = "https://www.google.com/search?q=";
pub const LINKEDIN_SEARCH_SUFFIX: &str = "site:linkedin.com/company";

/// Get all columns an input batch must provide
pub fn required_columns() -> Vec<&'static str> {
    vec![
        COMPANY,
        OWNER_EMAIL,
        OWNER_PHONE,
        WEBSITE,
        OWNER_LINKEDIN,
        REVENUE,
        EMPLOYEES_COUNT,
    ]
}

/// Get the derived columns in the order they are appended on export
pub fn derived_columns() -> Vec<&'static str> {
    vec![
        VALID_EMAIL,
        FREE_EMAIL,
        MISSING_WEBSITE,
        MISSING_PHONE,
        LEAD_SCORE,
        LEAD_PRIORITY,
    ]
}
