use crate::types::LeadPriority;

/// Scores strictly above this are High priority
pub const HIGH_PRIORITY_ABOVE: i32 = 6;
/// Scores at or above this (and not High) are Medium priority
pub const MEDIUM_PRIORITY_FROM: i32 = 3;

/// Map a lead score onto its follow-up tier
pub fn categorize(score: i32) -> LeadPriority {
    if score > HIGH_PRIORITY_ABOVE {
        LeadPriority::High
    } else if score >= MEDIUM_PRIORITY_FROM {
        LeadPriority::Medium
    } else {
        LeadPriority::Low
    }
}
