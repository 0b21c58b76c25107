//! Machine maintenance record model and DTOs.

use faena_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `maintenance_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRecord {
    pub id: DbId,
    pub machine_id: DbId,
    pub maintenance_type: String,
    pub description: String,
    pub hour_meter: Decimal,
    pub cost: Decimal,
    pub performed_at: Date,
    pub performed_by: Option<String>,
    pub photo_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaintenanceRecord {
    pub machine_id: DbId,
    #[validate(length(min = 1))]
    pub maintenance_type: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    pub hour_meter: Decimal,
    pub cost: Option<Decimal>,
    pub performed_at: Date,
    pub performed_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMaintenanceRecord {
    pub maintenance_type: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,
    pub hour_meter: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub performed_at: Option<Date>,
    pub performed_by: Option<String>,
}

/// Query filters for listing maintenance records.
#[derive(Debug, Default, Deserialize)]
pub struct MaintenanceFilter {
    pub machine_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
