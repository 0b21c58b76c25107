//! Payroll arithmetic for completed shifts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::types::Date;

/// Overtime is paid at 150% of the regular hourly rate.
pub const OVERTIME_MULTIPLIER: Decimal = dec!(1.5);

/// Money amounts are stored with two decimal places.
const MONEY_SCALE: u32 = 2;

/// Pay for one worker over one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayBreakdown {
    pub regular_pay: Decimal,
    pub overtime_pay: Decimal,
    pub total_pay: Decimal,
}

/// Convert worked minutes into pay at `hourly_rate`.
pub fn minutes_to_pay(minutes: i64, hourly_rate: Decimal) -> Decimal {
    (Decimal::from(minutes) * hourly_rate / dec!(60)).round_dp(MONEY_SCALE)
}

/// Compute regular, overtime and total pay.
pub fn compute_pay(
    regular_minutes: i64,
    overtime_minutes: i64,
    hourly_rate: Decimal,
    overtime_multiplier: Decimal,
) -> PayBreakdown {
    let regular_pay = minutes_to_pay(regular_minutes, hourly_rate);
    let overtime_pay = minutes_to_pay(overtime_minutes, hourly_rate * overtime_multiplier);
    PayBreakdown {
        regular_pay,
        overtime_pay,
        total_pay: regular_pay + overtime_pay,
    }
}

/// Validate a payroll period. Both ends are inclusive.
pub fn validate_period(start: Date, end: Date) -> Result<(), String> {
    if end < start {
        return Err(format!(
            "Period end {end} must not be before period start {start}"
        ));
    }
    Ok(())
}
