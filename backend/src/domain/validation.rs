//! Field checks for create requests. Each check appends to a list so a caller
//! can report every bad field at once.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::{FieldError, FieldSource};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_DESCRIPTION_LENGTH: usize = 256;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .unwrap()
});

static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?$").unwrap());

pub fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    if name.trim().is_empty() {
        errors.push(FieldError::new(FieldSource::Body, "name", "must not be empty"));
    } else if name.trim().chars().count() > MAX_NAME_LENGTH {
        errors.push(FieldError::new(
            FieldSource::Body,
            "name",
            format!("must be at most {} characters", MAX_NAME_LENGTH),
        ));
    }
}

pub fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    let email = email.trim();
    if email.len() > MAX_EMAIL_LENGTH || !EMAIL_PATTERN.is_match(email) {
        errors.push(FieldError::new(
            FieldSource::Body,
            "email",
            "is not a valid email address",
        ));
    }
}

pub fn check_amount(amount: &str, errors: &mut Vec<FieldError>) {
    if !AMOUNT_PATTERN.is_match(amount.trim()) {
        errors.push(FieldError::new(
            FieldSource::Body,
            "amount",
            "must be a decimal number such as \"100.00\"",
        ));
    }
}

pub fn check_description(description: &str, errors: &mut Vec<FieldError>) {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        errors.push(FieldError::new(
            FieldSource::Body,
            "description",
            format!("must be at most {} characters", MAX_DESCRIPTION_LENGTH),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_ok(email: &str) -> bool {
        let mut errors = Vec::new();
        check_email(email, &mut errors);
        errors.is_empty()
    }

    fn amount_ok(amount: &str) -> bool {
        let mut errors = Vec::new();
        check_amount(amount, &mut errors);
        errors.is_empty()
    }

    #[test]
    fn test_valid_emails() {
        assert!(email_ok("jane.doe@example.com"));
        assert!(email_ok("first+tag@sub.example.co.uk"));
        assert!(email_ok("  padded@example.com  "));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!email_ok(""));
        assert!(!email_ok("plainaddress"));
        assert!(!email_ok("missing-at.example.com"));
        assert!(!email_ok("two@@example.com"));
        assert!(!email_ok("no-tld@localhost"));
        assert!(!email_ok("space in@example.com"));
        assert!(!email_ok(&format!("{}@example.com", "a".repeat(250))));
    }

    #[test]
    fn test_amounts() {
        assert!(amount_ok("100.00"));
        assert!(amount_ok("-5"));
        assert!(amount_ok("0.000001"));
        assert!(!amount_ok(""));
        assert!(!amount_ok("ten"));
        assert!(!amount_ok("1e3"));
        assert!(!amount_ok("1."));
        assert!(!amount_ok(".5"));
        assert!(!amount_ok("1,000.00"));
    }

    #[test]
    fn test_name_checks() {
        let mut errors = Vec::new();
        check_name("   ", &mut errors);
        check_name(&"x".repeat(MAX_NAME_LENGTH + 1), &mut errors);
        check_name("Jane Doe", &mut errors);

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.field == "name"));
    }

    #[test]
    fn test_description_length() {
        let mut errors = Vec::new();
        check_description("", &mut errors);
        check_description(&"d".repeat(MAX_DESCRIPTION_LENGTH), &mut errors);
        assert!(errors.is_empty());

        check_description(&"d".repeat(MAX_DESCRIPTION_LENGTH + 1), &mut errors);
        assert_eq!(errors.len(), 1);
    }
}
