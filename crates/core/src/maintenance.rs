//! Preventive-maintenance scheduling by hour meter.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;

pub const MAINTENANCE_PREVENTIVE: &str = "preventive";
pub const MAINTENANCE_CORRECTIVE: &str = "corrective";

/// All valid `maintenance_records.maintenance_type` values.
pub const VALID_MAINTENANCE_TYPES: &[&str] = &[MAINTENANCE_PREVENTIVE, MAINTENANCE_CORRECTIVE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceType {
    /// Scheduled service; resets the hour-meter countdown.
    Preventive,
    Corrective,
}

impl MaintenanceType {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            MAINTENANCE_PREVENTIVE => Ok(MaintenanceType::Preventive),
            MAINTENANCE_CORRECTIVE => Ok(MaintenanceType::Corrective),
            other => Err(CoreError::Validation(format!(
                "Invalid maintenance_type '{other}'. Must be one of: {}",
                VALID_MAINTENANCE_TYPES.join(", ")
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MaintenanceType::Preventive => MAINTENANCE_PREVENTIVE,
            MaintenanceType::Corrective => MAINTENANCE_CORRECTIVE,
        }
    }
}

/// Where a machine stands relative to its next service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaintenanceStatus {
    pub hours_since_service: Decimal,
    /// Negative once the machine is overdue.
    pub hours_remaining: Decimal,
    pub is_due: bool,
}

/// Compare the current hour meter against the last service reading.
///
/// A machine that was never serviced counts from hour zero.
pub fn maintenance_due(
    current_hour_meter: Decimal,
    last_service_hour_meter: Option<Decimal>,
    interval_hours: Decimal,
) -> MaintenanceStatus {
    let since = (current_hour_meter - last_service_hour_meter.unwrap_or(Decimal::ZERO))
        .max(Decimal::ZERO);
    let remaining = interval_hours - since;
    MaintenanceStatus {
        hours_since_service: since,
        hours_remaining: remaining,
        is_due: remaining <= Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn maintenance_type_parses() {
        assert_eq!(
            MaintenanceType::parse("preventive").unwrap(),
            MaintenanceType::Preventive
        );
        assert_eq!(MaintenanceType::Corrective.as_str(), "corrective");
        assert!(MaintenanceType::parse("cosmetic").is_err());
    }

    #[test]
    fn not_due_within_interval() {
        let s = maintenance_due(dec!(1400), Some(dec!(1250)), dec!(250));
        assert_eq!(s.hours_since_service, dec!(150));
        assert_eq!(s.hours_remaining, dec!(100));
        assert!(!s.is_due);
    }

    #[test]
    fn due_exactly_at_interval() {
        assert!(maintenance_due(dec!(1500), Some(dec!(1250)), dec!(250)).is_due);
    }

    #[test]
    fn never_serviced_counts_from_zero() {
        let s = maintenance_due(dec!(300), None, dec!(250));
        assert!(s.is_due);
        assert_eq!(s.hours_remaining, dec!(-50));
    }

    #[test]
    fn meter_reset_does_not_go_negative() {
        let s = maintenance_due(dec!(10), Some(dec!(900)), dec!(250));
        assert_eq!(s.hours_since_service, dec!(0));
        assert!(!s.is_due);
    }
}
