//! Aggregate (árido) delivery model and DTOs.

use faena_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `aggregate_deliveries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AggregateDelivery {
    pub id: DbId,
    pub project_id: DbId,
    pub material: String,
    pub volume_m3: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
    pub delivered_at: Timestamp,
    pub truck_plate: Option<String>,
    pub driver_name: Option<String>,
    pub ticket_number: Option<String>,
    pub ticket_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a delivery. `total` is `volume_m3 * unit_price`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAggregateDelivery {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub material: String,
    pub volume_m3: Decimal,
    pub unit_price: Decimal,
    /// Defaults to now.
    pub delivered_at: Option<Timestamp>,
    #[validate(length(max = 20))]
    pub truck_plate: Option<String>,
    pub driver_name: Option<String>,
    pub ticket_number: Option<String>,
}

/// DTO for updating a delivery. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAggregateDelivery {
    #[validate(length(min = 1, max = 100))]
    pub material: Option<String>,
    pub volume_m3: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub delivered_at: Option<Timestamp>,
    #[validate(length(max = 20))]
    pub truck_plate: Option<String>,
    pub driver_name: Option<String>,
    pub ticket_number: Option<String>,
}

/// Query filters for listing deliveries.
#[derive(Debug, Default, Deserialize)]
pub struct DeliveryFilter {
    pub project_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
