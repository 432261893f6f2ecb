//! Syntactic field checks. Nothing here touches the network; an address that
//! passes `is_valid_email` may still bounce.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::FREE_EMAIL_DOMAINS;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.\w+\n?\z").expect("email pattern is a valid regex")
});

/// Results of the field checks for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChecks {
    pub valid_email: bool,
    pub free_email: bool,
    pub missing_website: bool,
    pub missing_phone: bool,
}

/// `local-part@domain.tld` made of word characters, dots and hyphens.
/// A single trailing newline is tolerated.
pub fn is_valid_email(value: Option<&str>) -> bool {
    match value {
        Some(email) if !email.is_empty() => EMAIL_PATTERN.is_match(email),
        _ => false,
    }
}

/// Valid address hosted on a consumer mail provider
pub fn is_free_email(value: Option<&str>) -> bool {
    if !is_valid_email(value) {
        return false;
    }
    value
        .and_then(|email| email.rsplit('@').next())
        .map(|domain| FREE_EMAIL_DOMAINS.contains(&domain))
        .unwrap_or(false)
}

/// Absent or exactly empty. Whitespace-only text counts as present.
pub fn is_missing(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

pub fn check_fields(
    owner_email: Option<&str>,
    website: Option<&str>,
    owner_phone: Option<&str>,
) -> FieldChecks {
    FieldChecks {
        valid_email: is_valid_email(owner_email),
        free_email: is_free_email(owner_email),
        missing_website: is_missing(website),
        missing_phone: is_missing(owner_phone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_shapes() {
        assert!(is_valid_email(Some("jane@example.com")));
        assert!(is_valid_email(Some("jane.doe-1@mail.example.co.uk")));
        assert!(is_valid_email(Some("j_d@x-y.io")));
    }

    #[test]
    fn test_invalid_email_shapes() {
        assert!(!is_valid_email(None));
        assert!(!is_valid_email(Some("")));
        assert!(!is_valid_email(Some("jane")));
        assert!(!is_valid_email(Some("jane@example")));
        assert!(!is_valid_email(Some("jane doe@example.com")));
        assert!(!is_valid_email(Some("jane@example.com ")));
        assert!(!is_valid_email(Some("jane+tag@example.com")));
        assert!(!is_valid_email(Some("a@b@c.com")));
        assert!(!is_valid_email(Some("jane@example.com\n\n")));
        assert!(!is_valid_email(Some("\njane@example.com")));
    }

    #[test]
    fn test_one_trailing_newline_is_tolerated() {
        assert!(is_valid_email(Some("jane@example.com\n")));
        assert!(!is_free_email(Some("jane@gmail.com\n")));
        assert!(check_fields(Some("jane@example.com\n"), Some("x"), Some("y")).valid_email);
    }

    #[test]
    fn test_free_email_requires_validity() {
        assert!(is_free_email(Some("jane@gmail.com")));
        assert!(is_free_email(Some("x@outlook.com")));
        assert!(!is_free_email(Some("jane@example.com")));
        assert!(!is_free_email(Some("gmail.com")));
        assert!(!is_free_email(None));
    }

    #[test]
    fn test_free_domain_match_is_exact() {
        assert!(!is_free_email(Some("jane@Gmail.com")));
        assert!(!is_free_email(Some("jane@mail.gmail.com")));
        assert!(!is_free_email(Some("jane@gmail.com.au")));
    }

    #[test]
    fn test_missing_only_for_absent_or_empty() {
        assert!(is_missing(None));
        assert!(is_missing(Some("")));
        assert!(!is_missing(Some(" ")));
        assert!(!is_missing(Some("acme.com")));
    }

    #[test]
    fn test_check_fields_combines_predicates() {
        let checks = check_fields(Some("jane@yahoo.com"), None, Some("555-0100"));
        assert_eq!(
            checks,
            FieldChecks {
                valid_email: true,
                free_email: true,
                missing_website: true,
                missing_phone: false,
            }
        );
    }
}
