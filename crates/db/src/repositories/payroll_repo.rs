//! Repository for the `payroll_summaries` table.

use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::payroll::{NewPayrollSummary, PayrollFilter, PayrollSummary};

const COLUMNS: &str = "id, user_id, period_start, period_end, shift_count, regular_minutes, \
                        overtime_minutes, hourly_rate, overtime_multiplier, regular_pay, \
                        overtime_pay, total_pay, created_at, updated_at";

/// Provides persistence for generated payroll summaries.
pub struct PayrollSummaryRepo;

impl PayrollSummaryRepo {
    /// Insert a summary, replacing any earlier one for the same user and period.
    pub async fn upsert<'e, E>(
        executor: E,
        input: &NewPayrollSummary,
    ) -> Result<PayrollSummary, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO payroll_summaries
                (user_id, period_start, period_end, shift_count, regular_minutes, overtime_minutes,
                 hourly_rate, overtime_multiplier, regular_pay, overtime_pay, total_pay)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             ON CONFLICT ON CONSTRAINT uq_payroll_summaries_user_period DO UPDATE SET
                shift_count = EXCLUDED.shift_count,
                regular_minutes = EXCLUDED.regular_minutes,
                overtime_minutes = EXCLUDED.overtime_minutes,
                hourly_rate = EXCLUDED.hourly_rate,
                overtime_multiplier = EXCLUDED.overtime_multiplier,
                regular_pay = EXCLUDED.regular_pay,
                overtime_pay = EXCLUDED.overtime_pay,
                total_pay = EXCLUDED.total_pay
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PayrollSummary>(&query)
            .bind(input.user_id)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.shift_count)
            .bind(input.regular_minutes)
            .bind(input.overtime_minutes)
            .bind(input.hourly_rate)
            .bind(input.overtime_multiplier)
            .bind(input.regular_pay)
            .bind(input.overtime_pay)
            .bind(input.total_pay)
            .fetch_one(executor)
            .await
    }

    /// Upsert a whole generation run in one transaction: either every row
    /// lands or none does.
    pub async fn upsert_all(
        pool: &PgPool,
        rows: &[NewPayrollSummary],
    ) -> Result<Vec<PayrollSummary>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(rows.len());
        for row in rows {
            saved.push(Self::upsert(&mut *tx, row).await?);
        }
        tx.commit().await?;
        Ok(saved)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PayrollSummary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payroll_summaries WHERE id = $1");
        sqlx::query_as::<_, PayrollSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List summaries, latest period first.
    pub async fn list(
        pool: &PgPool,
        filter: &PayrollFilter,
    ) -> Result<Vec<PayrollSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payroll_summaries
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::DATE IS NULL OR period_start >= $2)
               AND ($3::DATE IS NULL OR period_end <= $3)
             ORDER BY period_end DESC, user_id
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, PayrollSummary>(&query)
            .bind(filter.user_id)
            .bind(filter.period_start)
            .bind(filter.period_end)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Every summary for exactly this period, ordered by worker.
    pub async fn list_for_period(
        pool: &PgPool,
        period_start: Date,
        period_end: Date,
    ) -> Result<Vec<PayrollSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payroll_summaries
             WHERE period_start = $1 AND period_end = $2
             ORDER BY user_id"
        );
        sqlx::query_as::<_, PayrollSummary>(&query)
            .bind(period_start)
            .bind(period_end)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM payroll_summaries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
