//! Deterministic lead scoring.
//!
//! Revenue and headcount are free text in most exports. A value that does not
//! parse as an integer contributes nothing: missing financial signal is neutral,
//! not a penalty.

use crate::pipeline::processing::validate::FieldChecks;

/// Points awarded for a syntactically valid email
pub const VALID_EMAIL_POINTS: i32 = 2;
/// Extra points when that email is not on a consumer provider
pub const BUSINESS_EMAIL_POINTS: i32 = 2;
pub const REVENUE_POINTS: i32 = 2;
pub const EMPLOYEE_POINTS: i32 = 2;
pub const MISSING_WEBSITE_PENALTY: i32 = 1;
pub const MISSING_PHONE_PENALTY: i32 = 1;

/// Revenue (after unit and separator stripping) at or above this earns points
pub const REVENUE_THRESHOLD: i64 = 5000;
/// Headcount strictly above this earns points
pub const EMPLOYEE_THRESHOLD: i64 = 10_000;

pub fn revenue_score(value: Option<&str>) -> i32 {
    let parsed = value.and_then(|raw| {
        raw.replace("Cr", "")
            .replace(',', "")
            .trim()
            .parse::<i64>()
            .ok()
    });
    match parsed {
        Some(revenue) if revenue >= REVENUE_THRESHOLD => REVENUE_POINTS,
        _ => 0,
    }
}

pub fn employee_score(value: Option<&str>) -> i32 {
    let parsed = value.and_then(|raw| raw.trim().parse::<i64>().ok());
    match parsed {
        Some(count) if count > EMPLOYEE_THRESHOLD => EMPLOYEE_POINTS,
        _ => 0,
    }
}

/// Sum of the scoring rules. Not clamped.
pub fn lead_score(checks: &FieldChecks, revenue: Option<&str>, employees: Option<&str>) -> i32 {
    let mut score = 0;

    if checks.valid_email {
        score += VALID_EMAIL_POINTS;
    }
    // Stacks with the rule above: a business address is worth both.
    if checks.valid_email && !checks.free_email {
        score += BUSINESS_EMAIL_POINTS;
    }

    score += revenue_score(revenue);
    score += employee_score(employees);

    if checks.missing_website {
        score -= MISSING_WEBSITE_PENALTY;
    }
    if checks.missing_phone {
        score -= MISSING_PHONE_PENALTY;
    }

    score
}
