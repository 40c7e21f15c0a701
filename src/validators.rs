/// Input validators for registration data
///
/// Length bounds first, format second; inputs are trimmed before any
/// check so surrounding whitespace never reaches storage.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321
const MIN_EMAIL_LENGTH: usize = 5;
const MAX_FULL_NAME_LENGTH: usize = 256;

lazy_static! {
    // RFC 5322 simplified email regex (practical validation)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();
}

/// Validates an email address: bounds, single @, no control bytes,
/// then format.
pub fn is_valid_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("email"));
    }

    if trimmed.len() < MIN_EMAIL_LENGTH {
        return Err(ValidationError::TooShort("email", MIN_EMAIL_LENGTH));
    }

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong("email", MAX_EMAIL_LENGTH));
    }

    if trimmed.matches('@').count() != 1 || trimmed.chars().any(|c| c.is_control()) {
        return Err(ValidationError::InvalidFormat("email"));
    }

    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat("email"));
    }

    Ok(trimmed.to_string())
}

/// Validates an optional display name: bounded and free of control
/// characters. `None` passes through untouched.
pub fn is_valid_full_name(full_name: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(name) = full_name else {
        return Ok(None);
    };
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("full_name"));
    }

    if trimmed.len() > MAX_FULL_NAME_LENGTH {
        return Err(ValidationError::TooLong("full_name", MAX_FULL_NAME_LENGTH));
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(ValidationError::InvalidFormat("full_name"));
    }

    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(is_valid_email("user@example.com").is_ok());
        assert!(is_valid_email("test.email@domain.co.uk").is_ok());
        assert!(is_valid_email("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_invalid_email_format() {
        assert!(is_valid_email("invalid").is_err());
        assert!(is_valid_email("user@").is_err());
        assert!(is_valid_email("@example.com").is_err());
        assert!(is_valid_email("user@@example.com").is_err());
    }

    #[test]
    fn test_email_length_limits() {
        let too_long = format!("{}@example.com", "a".repeat(250));
        assert!(is_valid_email(&too_long).is_err());

        assert!(is_valid_email("a@a").is_err()); // Too short
    }

    #[test]
    fn test_email_is_trimmed() {
        assert_eq!(
            is_valid_email("  user@example.com  ").unwrap(),
            "user@example.com"
        );
    }

    #[test]
    fn test_email_rejects_control_characters() {
        assert!(is_valid_email("user\0@example.com").is_err());
    }

    #[test]
    fn test_valid_full_name() {
        assert_eq!(
            is_valid_full_name(Some("John Doe")).unwrap(),
            Some("John Doe".to_string())
        );
        assert_eq!(is_valid_full_name(None).unwrap(), None);
    }

    #[test]
    fn test_full_name_limits() {
        let too_long = "a".repeat(257);
        assert!(is_valid_full_name(Some(&too_long)).is_err());
        assert!(is_valid_full_name(Some("")).is_err());
        assert!(is_valid_full_name(Some("Name\0null")).is_err());
    }
}
