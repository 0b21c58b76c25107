//! Repository for the `payments` table.

use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::{CreatePayment, Payment, PaymentFilter, UpdatePayment};

const COLUMNS: &str = "id, project_id, contract_id, amount, payment_date, method, reference, \
                        notes, created_at, updated_at";

/// Provides CRUD operations for client payments.
pub struct PaymentRepo;

impl PaymentRepo {
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (project_id, contract_id, amount, payment_date, method, reference, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.project_id)
            .bind(input.contract_id)
            .bind(input.amount)
            .bind(input.payment_date)
            .bind(&input.method)
            .bind(&input.reference)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List payments, most recent first.
    pub async fn list(pool: &PgPool, filter: &PaymentFilter) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
               AND ($2::BIGINT IS NULL OR contract_id = $2)
             ORDER BY payment_date DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(filter.project_id)
            .bind(filter.contract_id)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a payment. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePayment,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments SET
                contract_id = COALESCE($2, contract_id),
                amount = COALESCE($3, amount),
                payment_date = COALESCE($4, payment_date),
                method = COALESCE($5, method),
                reference = COALESCE($6, reference),
                notes = COALESCE($7, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .bind(input.contract_id)
            .bind(input.amount)
            .bind(input.payment_date)
            .bind(&input.method)
            .bind(&input.reference)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
