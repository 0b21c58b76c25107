//! Machine lease (arriendo) pricing.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::types::Date;
use crate::validation::{validate_date_range, validate_positive};

pub const RATE_HOUR: &str = "hour";
pub const RATE_DAY: &str = "day";
pub const RATE_MONTH: &str = "month";

/// All valid `leases.rate_type` values.
pub const VALID_RATE_TYPES: &[&str] = &[RATE_HOUR, RATE_DAY, RATE_MONTH];

/// Billing unit of a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateType {
    Hour,
    Day,
    Month,
}

impl RateType {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            RATE_HOUR => Ok(RateType::Hour),
            RATE_DAY => Ok(RateType::Day),
            RATE_MONTH => Ok(RateType::Month),
            other => Err(CoreError::Validation(format!(
                "Invalid rate_type '{other}'. Must be one of: {}",
                VALID_RATE_TYPES.join(", ")
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RateType::Hour => RATE_HOUR,
            RateType::Day => RATE_DAY,
            RateType::Month => RATE_MONTH,
        }
    }
}

/// Check the priced fields of a lease before its total is computed.
pub fn validate_lease(
    rate: Decimal,
    quantity: Decimal,
    start_date: Date,
    end_date: Option<Date>,
) -> Result<(), String> {
    validate_positive("rate", rate)?;
    validate_positive("quantity", quantity)?;
    validate_date_range(start_date, end_date)
}

/// Billed amount for `quantity` units (hours, days or months) at `rate`.
pub fn lease_total(rate: Decimal, quantity: Decimal) -> Decimal {
    (rate * quantity).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_is_rate_times_quantity() {
        assert_eq!(lease_total(dec!(45000), dec!(8)), dec!(360000));
    }

    #[test]
    fn rate_type_parses_known_units() {
        assert_eq!(RateType::parse("day").unwrap(), RateType::Day);
        assert_eq!(RateType::Month.as_str(), "month");
        assert!(RateType::parse("week").is_err());
    }

    #[test]
    fn lease_rejects_zero_quantity_and_inverted_dates() {
        let start = Date::from_ymd_opt(2026, 3, 10).unwrap();
        let before = Date::from_ymd_opt(2026, 3, 1).unwrap();
        assert!(validate_lease(dec!(100), dec!(1), start, None).is_ok());
        assert!(validate_lease(dec!(100), dec!(0), start, None).is_err());
        assert!(validate_lease(dec!(0), dec!(3), start, None).is_err());
        assert!(validate_lease(dec!(100), dec!(3), start, Some(before)).is_err());
    }

    #[test]
    fn fractional_quantity_rounds_to_cents() {
        assert_eq!(lease_total(dec!(10), dec!(0.333)), dec!(3.33));
    }
}
