//! Repository for the `inventory_movements` ledger.
//!
//! Movements are append-only. Recording one locks the product row, computes
//! the new stock level, and writes both rows in a single transaction.

use faena_core::error::CoreError;
use faena_core::inventory::{apply_movement, MovementType};
use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::types::DbId;
use sqlx::PgPool;

use crate::models::inventory::{CreateInventoryMovement, InventoryMovement, MovementFilter, Product};
use crate::repositories::product_repo;

const COLUMNS: &str = "id, product_id, user_id, project_id, movement_type, quantity, stock_after, \
                        unit_cost, notes, moved_at, created_at, updated_at";

/// Result of trying to record a movement.
#[derive(Debug)]
pub enum StockOutcome {
    Recorded {
        movement: InventoryMovement,
        product: Product,
    },
    ProductNotFound,
    /// The movement breaks a stock rule; nothing was written.
    Rejected(CoreError),
}

/// Provides insert and query operations for stock movements.
pub struct InventoryMovementRepo;

impl InventoryMovementRepo {
    /// Apply a movement to its product and append it to the ledger.
    pub async fn record(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateInventoryMovement,
        movement_type: MovementType,
    ) -> Result<StockOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock_query = format!(
            "SELECT {} FROM products WHERE id = $1 FOR UPDATE",
            product_repo::COLUMNS
        );
        let Some(product) = sqlx::query_as::<_, Product>(&lock_query)
            .bind(input.product_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(StockOutcome::ProductNotFound);
        };

        let stock_after = match apply_movement(product.stock, movement_type, input.quantity) {
            Ok(stock) => stock,
            Err(e) => return Ok(StockOutcome::Rejected(e)),
        };

        let update_query = format!(
            "UPDATE products SET stock = $2 WHERE id = $1 RETURNING {}",
            product_repo::COLUMNS
        );
        let product = sqlx::query_as::<_, Product>(&update_query)
            .bind(product.id)
            .bind(stock_after)
            .fetch_one(&mut *tx)
            .await?;

        let insert_query = format!(
            "INSERT INTO inventory_movements
                (product_id, user_id, project_id, movement_type, quantity, stock_after, unit_cost, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let movement = sqlx::query_as::<_, InventoryMovement>(&insert_query)
            .bind(product.id)
            .bind(user_id)
            .bind(input.project_id)
            .bind(movement_type.as_str())
            .bind(input.quantity)
            .bind(stock_after)
            .bind(input.unit_cost)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            product_id = product.id,
            movement_id = movement.id,
            stock = %product.stock,
            "Inventory movement recorded",
        );
        Ok(StockOutcome::Recorded { movement, product })
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InventoryMovement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory_movements WHERE id = $1");
        sqlx::query_as::<_, InventoryMovement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List movements, most recent first.
    pub async fn list(
        pool: &PgPool,
        filter: &MovementFilter,
    ) -> Result<Vec<InventoryMovement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inventory_movements
             WHERE ($1::BIGINT IS NULL OR product_id = $1)
               AND ($2::BIGINT IS NULL OR project_id = $2)
             ORDER BY moved_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, InventoryMovement>(&query)
            .bind(filter.product_id)
            .bind(filter.project_id)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }
}
