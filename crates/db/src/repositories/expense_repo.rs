//! Repository for the `expenses` table.

use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::types::DbId;
use sqlx::PgPool;

use crate::models::expense::{CreateExpense, Expense, ExpenseFilter, UpdateExpense};

const COLUMNS: &str = "id, project_id, user_id, category, description, amount, expense_date, \
                        receipt_path, created_at, updated_at";

/// Provides CRUD operations for expenses.
pub struct ExpenseRepo;

impl ExpenseRepo {
    /// Insert a new expense recorded by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateExpense,
    ) -> Result<Expense, sqlx::Error> {
        let query = format!(
            "INSERT INTO expenses (project_id, user_id, category, description, amount, expense_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(input.project_id)
            .bind(user_id)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.amount)
            .bind(input.expense_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses WHERE id = $1");
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List expenses, most recent first.
    pub async fn list(pool: &PgPool, filter: &ExpenseFilter) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM expenses
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
               AND ($2::BIGINT IS NULL OR user_id = $2)
             ORDER BY expense_date DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(filter.project_id)
            .bind(filter.user_id)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Update an expense. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!(
            "UPDATE expenses SET
                project_id = COALESCE($2, project_id),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                amount = COALESCE($5, amount),
                expense_date = COALESCE($6, expense_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.amount)
            .bind(input.expense_date)
            .fetch_optional(pool)
            .await
    }

    /// Store the relative path of an uploaded receipt.
    pub async fn set_receipt_path(
        pool: &PgPool,
        id: DbId,
        path: &str,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query =
            format!("UPDATE expenses SET receipt_path = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
