//! Repository for the `products` table.

use faena_core::search::{
    build_like_pattern, clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use faena_core::types::DbId;
use sqlx::PgPool;

use crate::models::inventory::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Column list shared with [`super::InventoryMovementRepo`].
pub(crate) const COLUMNS: &str =
    "id, sku, name, unit, stock, min_stock, unit_cost, created_at, updated_at";

/// Provides CRUD operations for stocked products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product with zero stock.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (sku, name, unit, min_stock, unit_cost)
             VALUES ($1, $2, COALESCE($3, 'unit'), COALESCE($4, 0), COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(&input.unit)
            .bind(input.min_stock)
            .bind(input.unit_cost)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products ordered by name.
    pub async fn list(pool: &PgPool, filter: &ProductFilter) -> Result<Vec<Product>, sqlx::Error> {
        let pattern = filter.q.as_deref().and_then(build_like_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE ($1 = false OR stock <= min_stock)
               AND ($2::TEXT IS NULL OR sku ILIKE $2 OR name ILIKE $2)
             ORDER BY name, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(filter.low_stock)
            .bind(pattern)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Update product metadata. Stock only moves through the movement ledger.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                sku = COALESCE($2, sku),
                name = COALESCE($3, name),
                unit = COALESCE($4, unit),
                min_stock = COALESCE($5, min_stock),
                unit_cost = COALESCE($6, unit_cost)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(&input.unit)
            .bind(input.min_stock)
            .bind(input.unit_cost)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product and its movement history.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
