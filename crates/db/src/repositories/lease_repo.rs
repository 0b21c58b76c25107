//! Repository for the `leases` table.

use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::lease::{CreateLease, Lease, LeaseFilter, UpdateLease};

const COLUMNS: &str = "id, machine_id, project_id, rate_type, rate, quantity, total, \
                        start_date, end_date, notes, created_at, updated_at";

/// Provides CRUD operations for machine leases.
pub struct LeaseRepo;

impl LeaseRepo {
    /// Insert a lease with its precomputed `total`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLease,
        total: Decimal,
    ) -> Result<Lease, sqlx::Error> {
        let query = format!(
            "INSERT INTO leases
                (machine_id, project_id, rate_type, rate, quantity, total, start_date, end_date, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lease>(&query)
            .bind(input.machine_id)
            .bind(input.project_id)
            .bind(&input.rate_type)
            .bind(input.rate)
            .bind(input.quantity)
            .bind(total)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lease>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leases WHERE id = $1");
        sqlx::query_as::<_, Lease>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leases, newest start date first.
    pub async fn list(pool: &PgPool, filter: &LeaseFilter) -> Result<Vec<Lease>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leases
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
               AND ($2::BIGINT IS NULL OR machine_id = $2)
             ORDER BY start_date DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Lease>(&query)
            .bind(filter.project_id)
            .bind(filter.machine_id)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a lease. `total` must already reflect the merged rate and quantity.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLease,
        total: Decimal,
    ) -> Result<Option<Lease>, sqlx::Error> {
        let query = format!(
            "UPDATE leases SET
                rate_type = COALESCE($2, rate_type),
                rate = COALESCE($3, rate),
                quantity = COALESCE($4, quantity),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                notes = COALESCE($7, notes),
                total = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lease>(&query)
            .bind(id)
            .bind(&input.rate_type)
            .bind(input.rate)
            .bind(input.quantity)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.notes)
            .bind(total)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leases WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
