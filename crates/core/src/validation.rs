//! Field-level validation helpers shared by the API handlers.
//!
//! Each helper returns `Err` with a human-readable message; handlers wrap it
//! in `CoreError::Validation`.

use rust_decimal::Decimal;

use crate::types::Date;

/// Validate that `value` is one of the accepted values for `field`.
pub fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        ))
    }
}

/// Validate that a money amount or quantity is strictly positive.
pub fn validate_positive(field: &str, value: Decimal) -> Result<(), String> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(format!("{field} must be greater than zero"))
    }
}

/// Validate that a money amount or quantity is zero or positive.
pub fn validate_non_negative(field: &str, value: Decimal) -> Result<(), String> {
    if value >= Decimal::ZERO {
        Ok(())
    } else {
        Err(format!("{field} must not be negative"))
    }
}

/// Validate that an optional end date does not precede the start date.
pub fn validate_date_range(start: Date, end: Option<Date>) -> Result<(), String> {
    match end {
        Some(end) if end < start => Err(format!(
            "End date {end} must not be before start date {start}"
        )),
        _ => Ok(()),
    }
}

/// Validate that a required text field is not blank.
pub fn validate_not_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} must not be empty"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn one_of_accepts_listed_value() {
        assert!(validate_one_of("status", "active", &["active", "closed"]).is_ok());
    }

    #[test]
    fn one_of_rejects_unknown_value() {
        let err = validate_one_of("status", "open", &["active", "closed"]).unwrap_err();
        assert!(err.contains("Invalid status 'open'"));
        assert!(err.contains("active, closed"));
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(validate_positive("amount", dec!(0)).is_err());
        assert!(validate_positive("amount", dec!(-1.5)).is_err());
        assert!(validate_positive("amount", dec!(0.01)).is_ok());
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert!(validate_non_negative("stock", dec!(0)).is_ok());
        assert!(validate_non_negative("stock", dec!(-0.5)).is_err());
    }

    #[test]
    fn date_range_allows_open_end_and_same_day() {
        assert!(validate_date_range(date(2026, 3, 1), None).is_ok());
        assert!(validate_date_range(date(2026, 3, 1), Some(date(2026, 3, 1))).is_ok());
    }

    #[test]
    fn date_range_rejects_inverted_range() {
        let err = validate_date_range(date(2026, 3, 10), Some(date(2026, 3, 1))).unwrap_err();
        assert!(err.contains("must not be before"));
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(validate_not_blank("name", "   ").is_err());
        assert!(validate_not_blank("name", "Obra Norte").is_ok());
    }
}
