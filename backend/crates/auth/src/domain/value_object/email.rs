//! Email Normalisation and Format
//!
//! Emails are compared and stored in normalised form: trimmed and
//! lowercased. Format checking runs on the normalised value only.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,16}$").expect("email pattern compiles")
});

/// " Ann@Example.COM " -> "ann@example.com"
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Matches the accepted address shape. Expects a normalised address.
pub fn is_valid_format(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_compiles() {
        let pattern = LazyLock::force(&EMAIL_PATTERN);
        assert!(pattern.is_match("a@b.co"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Ann@Example.COM "), "ann@example.com");
        assert_eq!(normalize("a@b.io"), "a@b.io");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_valid_formats() {
        for email in [
            "ann@example.com",
            "first.last+tag@sub.domain.io",
            "a_b%c-d@x-y.museum",
        ] {
            assert!(is_valid_format(email), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_formats() {
        for email in [
            "",
            "ann",
            "ann@",
            "@example.com",
            "ann@example",
            "ann@example.c",
            "ann@example.abcdefghijklmnopq",
            "ANN@EXAMPLE.COM",
            "ann smith@example.com",
        ] {
            assert!(!is_valid_format(email), "{email} should be invalid");
        }
    }
}
