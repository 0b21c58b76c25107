//! Repository for the `aggregate_deliveries` table.

use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::types::DbId;
use sqlx::PgPool;

use crate::models::delivery::{
    AggregateDelivery, CreateAggregateDelivery, DeliveryFilter, UpdateAggregateDelivery,
};

const COLUMNS: &str = "id, project_id, material, volume_m3, unit_price, total, delivered_at, \
                        truck_plate, driver_name, ticket_number, ticket_path, \
                        created_at, updated_at";

/// Provides CRUD operations for aggregate deliveries.
///
/// `total` is always `ROUND(volume_m3 * unit_price, 2)`, kept in step on update.
pub struct AggregateDeliveryRepo;

impl AggregateDeliveryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAggregateDelivery,
    ) -> Result<AggregateDelivery, sqlx::Error> {
        let query = format!(
            "INSERT INTO aggregate_deliveries
                (project_id, material, volume_m3, unit_price, total, delivered_at,
                 truck_plate, driver_name, ticket_number)
             VALUES ($1, $2, $3, $4, ROUND($3 * $4, 2), COALESCE($5, NOW()), $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AggregateDelivery>(&query)
            .bind(input.project_id)
            .bind(&input.material)
            .bind(input.volume_m3)
            .bind(input.unit_price)
            .bind(input.delivered_at)
            .bind(&input.truck_plate)
            .bind(&input.driver_name)
            .bind(&input.ticket_number)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AggregateDelivery>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM aggregate_deliveries WHERE id = $1");
        sqlx::query_as::<_, AggregateDelivery>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List deliveries, most recent first.
    pub async fn list(
        pool: &PgPool,
        filter: &DeliveryFilter,
    ) -> Result<Vec<AggregateDelivery>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM aggregate_deliveries
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
             ORDER BY delivered_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AggregateDelivery>(&query)
            .bind(filter.project_id)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a delivery. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAggregateDelivery,
    ) -> Result<Option<AggregateDelivery>, sqlx::Error> {
        let query = format!(
            "UPDATE aggregate_deliveries SET
                material = COALESCE($2, material),
                volume_m3 = COALESCE($3, volume_m3),
                unit_price = COALESCE($4, unit_price),
                total = ROUND(COALESCE($3, volume_m3) * COALESCE($4, unit_price), 2),
                delivered_at = COALESCE($5, delivered_at),
                truck_plate = COALESCE($6, truck_plate),
                driver_name = COALESCE($7, driver_name),
                ticket_number = COALESCE($8, ticket_number)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AggregateDelivery>(&query)
            .bind(id)
            .bind(&input.material)
            .bind(input.volume_m3)
            .bind(input.unit_price)
            .bind(input.delivered_at)
            .bind(&input.truck_plate)
            .bind(&input.driver_name)
            .bind(&input.ticket_number)
            .fetch_optional(pool)
            .await
    }

    /// Store the relative path of a scanned delivery ticket.
    pub async fn set_ticket_path(
        pool: &PgPool,
        id: DbId,
        path: &str,
    ) -> Result<Option<AggregateDelivery>, sqlx::Error> {
        let query = format!(
            "UPDATE aggregate_deliveries SET ticket_path = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AggregateDelivery>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM aggregate_deliveries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
