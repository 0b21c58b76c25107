//! Daily machine labor report (reporte laboral) model and DTOs.

use faena_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `labor_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LaborReport {
    pub id: DbId,
    pub user_id: DbId,
    pub machine_id: DbId,
    pub project_id: DbId,
    pub report_date: Date,
    pub hour_meter_start: Decimal,
    pub hour_meter_end: Decimal,
    pub hours_worked: Decimal,
    pub fuel_liters: Option<Decimal>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a labor report. `hours_worked` is derived from the meters.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLaborReport {
    /// Operator; defaults to the authenticated user.
    pub user_id: Option<DbId>,
    pub machine_id: DbId,
    pub project_id: DbId,
    pub report_date: Date,
    pub hour_meter_start: Decimal,
    pub hour_meter_end: Decimal,
    pub fuel_liters: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// DTO for updating a labor report. Meter readings are immutable once recorded.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLaborReport {
    pub report_date: Option<Date>,
    pub fuel_liters: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Query filters for listing labor reports.
#[derive(Debug, Default, Deserialize)]
pub struct LaborReportFilter {
    pub project_id: Option<DbId>,
    pub machine_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
