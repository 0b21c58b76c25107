//! Daily machine labor reports (reporte laboral).

use rust_decimal::Decimal;

/// Machine hours from two hour-meter readings.
pub fn hours_worked(hour_meter_start: Decimal, hour_meter_end: Decimal) -> Result<Decimal, String> {
    if hour_meter_start < Decimal::ZERO {
        return Err("hour_meter_start must not be negative".into());
    }
    if hour_meter_end < hour_meter_start {
        return Err(format!(
            "hour_meter_end ({hour_meter_end}) must not be lower than hour_meter_start ({hour_meter_start})"
        ));
    }
    Ok(hour_meter_end - hour_meter_start)
}

/// Amount billed for machine hours at the machine's hourly rate.
pub fn labor_charge(hours: Decimal, hourly_rate: Decimal) -> Decimal {
    (hours * hourly_rate).round_dp(2)
}
