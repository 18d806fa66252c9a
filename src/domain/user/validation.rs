//! User validation utilities

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Email is required")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Birth date is required")]
    MissingBirthDate,

    #[error("Invalid date '{0}'. Expected a valid calendar date in YYYY-MM-DD format")]
    InvalidDateFormat(String),

    #[error("Birth date must be earlier than the current date.")]
    BirthDateInFuture,

    #[error("User must be at least {0} years old.")]
    UnderMinimumAge(u32),
}

/// Dot-separated atoms, an `@`, then dot-separated hostname labels
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*$",
    )
    .unwrap()
});

/// Exactly four year digits, two month digits and two day digits
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Validate the shape of an email address
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(UserValidationError::InvalidEmail)
    }
}

/// Parse a `YYYY-MM-DD` date string
///
/// Rejects strings that do not follow the pattern as well as dates that do
/// not exist on the calendar (e.g. `2023-02-31`).
pub fn parse_date(value: &str) -> Result<NaiveDate, UserValidationError> {
    if !DATE_PATTERN.is_match(value) {
        return Err(UserValidationError::InvalidDateFormat(value.to_string()));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| UserValidationError::InvalidDateFormat(value.to_string()))
}

/// The current date in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Check a birth date against the current date and the minimum birth date
///
/// Rules, first failure wins:
/// - A birth date after today is rejected
/// - A birth date after `min_birth_date` is rejected as under age
///
/// Today itself and `min_birth_date` itself are both accepted.
pub fn check_age_at(
    birth_date: NaiveDate,
    min_birth_date: NaiveDate,
    min_age: u32,
    today: NaiveDate,
) -> Result<(), UserValidationError> {
    if birth_date > today {
        return Err(UserValidationError::BirthDateInFuture);
    }

    if birth_date > min_birth_date {
        return Err(UserValidationError::UnderMinimumAge(min_age));
    }

    Ok(())
}

/// Validate a birth date, returning the rejection message if it fails
pub fn validate_age(birth_date: NaiveDate, min_birth_date: NaiveDate, min_age: u32) -> Option<String> {
    validate_age_at(birth_date, min_birth_date, min_age, today())
}

/// Same as [`validate_age`] with an explicit current date
pub fn validate_age_at(
    birth_date: NaiveDate,
    min_birth_date: NaiveDate,
    min_age: u32,
    today: NaiveDate,
) -> Option<String> {
    check_age_at(birth_date, min_birth_date, min_age, today)
        .err()
        .map(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Email tests
    #[test]
    fn test_valid_emails() {
        assert!(validate_email("john.doe@example.com").is_ok());
        assert!(validate_email("john.doe_Updated@example.com").is_ok());
        assert!(validate_email("a+tag@sub.example.org").is_ok());
        assert!(validate_email("user@localhost").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email(""), Err(UserValidationError::InvalidEmail));
        assert_eq!(
            validate_email("plainaddress"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("two@@example.com"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email(".lead@example.com"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("john@-example.com"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("john doe@example.com"),
            Err(UserValidationError::InvalidEmail)
        );
    }

    // Date parsing tests
    #[test]
    fn test_parse_valid_date() {
        assert_eq!(parse_date("1990-01-01"), Ok(date(1990, 1, 1)));
        assert_eq!(parse_date("2024-02-29"), Ok(date(2024, 2, 29)));
    }

    #[test]
    fn test_parse_invalid_month() {
        assert_eq!(
            parse_date("1990-13-01"),
            Err(UserValidationError::InvalidDateFormat("1990-13-01".to_string()))
        );
    }

    #[test]
    fn test_parse_impossible_day() {
        assert!(parse_date("2023-02-31").is_err());
        assert!(parse_date("2023-02-29").is_err());
    }

    #[test]
    fn test_parse_rejects_loose_formats() {
        assert!(parse_date("1990-1-01").is_err());
        assert!(parse_date("90-01-01").is_err());
        assert!(parse_date("1990/01/01").is_err());
        assert!(parse_date("1990-01-01T00:00:00").is_err());
        assert!(parse_date("").is_err());
    }

    // Age tests, with today fixed at 2024-01-01 and a minimum age of 18
    #[test]
    fn test_age_boundary_is_inclusive() {
        let today = date(2024, 1, 1);
        let min_birth_date = date(2006, 1, 1);

        assert_eq!(validate_age_at(date(2006, 1, 1), min_birth_date, 18, today), None);
        assert_eq!(validate_age_at(date(1990, 1, 1), min_birth_date, 18, today), None);
    }

    #[test]
    fn test_one_day_too_young() {
        let today = date(2024, 1, 1);
        let min_birth_date = date(2006, 1, 1);

        assert_eq!(
            validate_age_at(date(2006, 1, 2), min_birth_date, 18, today),
            Some("User must be at least 18 years old.".to_string())
        );
    }

    #[test]
    fn test_future_birth_date_takes_priority() {
        let today = date(2024, 1, 1);
        let min_birth_date = date(2006, 1, 1);

        assert_eq!(
            validate_age_at(date(2024, 1, 2), min_birth_date, 18, today),
            Some("Birth date must be earlier than the current date.".to_string())
        );
    }

    #[test]
    fn test_today_is_not_in_the_future() {
        let today = date(2024, 1, 1);

        // With no age requirement the minimum birth date is today itself
        assert_eq!(validate_age_at(today, today, 0, today), None);
        assert_eq!(
            check_age_at(today, date(2006, 1, 1), 18, today),
            Err(UserValidationError::UnderMinimumAge(18))
        );
    }

    #[test]
    fn test_validate_age_uses_wall_clock() {
        let now = today();
        let tomorrow = now.succ_opt().unwrap();

        assert_eq!(
            validate_age(tomorrow, now, 0),
            Some("Birth date must be earlier than the current date.".to_string())
        );
        assert_eq!(validate_age(now, now, 0), None);
    }
}
