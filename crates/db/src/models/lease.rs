//! Machine lease (arriendo) model and DTOs.

use faena_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A lease row from the `leases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lease {
    pub id: DbId,
    pub machine_id: DbId,
    pub project_id: DbId,
    pub rate_type: String,
    pub rate: Decimal,
    pub quantity: Decimal,
    pub total: Decimal,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a lease. `total` is computed, never supplied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLease {
    pub machine_id: DbId,
    pub project_id: DbId,
    #[validate(length(min = 1))]
    pub rate_type: String,
    pub rate: Decimal,
    pub quantity: Decimal,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub notes: Option<String>,
}

/// DTO for updating a lease. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLease {
    pub rate_type: Option<String>,
    pub rate: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub notes: Option<String>,
}

/// Query filters for listing leases.
#[derive(Debug, Default, Deserialize)]
pub struct LeaseFilter {
    pub project_id: Option<DbId>,
    pub machine_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
