//! Product and inventory movement models and DTOs.

use faena_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub sku: String,
    pub name: String,
    pub unit: String,
    pub stock: Decimal,
    pub min_stock: Decimal,
    pub unit_cost: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
///
/// Initial stock starts at zero; it only changes through movements.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 50))]
    pub sku: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub unit: Option<String>,
    pub min_stock: Option<Decimal>,
    pub unit_cost: Option<Decimal>,
}

/// DTO for updating an existing product. Stock is not editable here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 50))]
    pub sku: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub unit: Option<String>,
    pub min_stock: Option<Decimal>,
    pub unit_cost: Option<Decimal>,
}

/// A row from the append-only `inventory_movements` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryMovement {
    pub id: DbId,
    pub product_id: DbId,
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub movement_type: String,
    pub quantity: Decimal,
    pub stock_after: Decimal,
    pub unit_cost: Option<Decimal>,
    pub notes: Option<String>,
    pub moved_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a stock movement.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInventoryMovement {
    pub product_id: DbId,
    pub project_id: Option<DbId>,
    #[validate(length(min = 1))]
    pub movement_type: String,
    pub quantity: Decimal,
    pub unit_cost: Option<Decimal>,
    pub notes: Option<String>,
}

/// Query filters for listing products.
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    /// Only products at or below their minimum stock.
    #[serde(default)]
    pub low_stock: bool,
    /// Free-text match on SKU or name.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query filters for listing movements.
#[derive(Debug, Default, Deserialize)]
pub struct MovementFilter {
    pub product_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
