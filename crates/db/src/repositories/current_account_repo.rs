//! Repository for the `current_account_reports` table.

use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::types::DbId;
use sqlx::PgPool;

use crate::models::current_account::{
    CurrentAccountFilter, CurrentAccountReport, NewCurrentAccountReport,
};

const COLUMNS: &str = "id, project_id, period_start, period_end, lease_charges, \
                        delivery_charges, labor_charges, total_charges, total_payments, \
                        balance, created_at, updated_at";

/// Provides persistence for current account snapshots.
pub struct CurrentAccountReportRepo;

impl CurrentAccountReportRepo {
    /// Store a computed snapshot.
    pub async fn create(
        pool: &PgPool,
        input: &NewCurrentAccountReport,
    ) -> Result<CurrentAccountReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO current_account_reports
                (project_id, period_start, period_end, lease_charges, delivery_charges,
                 labor_charges, total_charges, total_payments, balance)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let t = &input.totals;
        sqlx::query_as::<_, CurrentAccountReport>(&query)
            .bind(input.project_id)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(t.lease_charges)
            .bind(t.delivery_charges)
            .bind(t.labor_charges)
            .bind(t.total_charges)
            .bind(t.total_payments)
            .bind(t.balance)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CurrentAccountReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM current_account_reports WHERE id = $1");
        sqlx::query_as::<_, CurrentAccountReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List snapshots, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &CurrentAccountFilter,
    ) -> Result<Vec<CurrentAccountReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM current_account_reports
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
             ORDER BY period_end DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CurrentAccountReport>(&query)
            .bind(filter.project_id)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM current_account_reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
