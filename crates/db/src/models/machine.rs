//! Machine (equipment) entity model and DTOs.

use faena_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A machine row from the `machines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Machine {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub machine_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub plate: Option<String>,
    pub hour_meter: Decimal,
    pub hourly_rate: Decimal,
    pub maintenance_interval_hours: Decimal,
    pub status: String,
    pub project_id: Option<DbId>,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new machine.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMachine {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub machine_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub plate: Option<String>,
    pub hour_meter: Option<Decimal>,
    pub hourly_rate: Option<Decimal>,
    pub maintenance_interval_hours: Option<Decimal>,
    /// Defaults to `available` if omitted.
    pub status: Option<String>,
    pub project_id: Option<DbId>,
}

/// DTO for updating an existing machine. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMachine {
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub machine_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub plate: Option<String>,
    pub hour_meter: Option<Decimal>,
    pub hourly_rate: Option<Decimal>,
    pub maintenance_interval_hours: Option<Decimal>,
    pub status: Option<String>,
    pub project_id: Option<DbId>,
}

/// Query filters for listing machines.
#[derive(Debug, Default, Deserialize)]
pub struct MachineFilter {
    pub project_id: Option<DbId>,
    pub status: Option<String>,
    /// Free-text match on code, name or type.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Aggregated usage of one machine from its labor reports.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MachineUsage {
    pub machine_id: DbId,
    pub report_count: i64,
    pub total_hours: Decimal,
    pub total_fuel_liters: Decimal,
    pub first_report_date: Option<Date>,
    pub last_report_date: Option<Date>,
}
