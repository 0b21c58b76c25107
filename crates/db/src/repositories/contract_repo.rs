//! Repository for the `contracts` table.

use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::types::DbId;
use sqlx::PgPool;

use crate::models::contract::{Contract, ContractFilter, CreateContract, UpdateContract};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, contract_number, client_name, description, amount, \
                        start_date, end_date, status, document_path, created_at, updated_at";

/// Provides CRUD operations for contracts.
pub struct ContractRepo;

impl ContractRepo {
    /// Insert a new contract. Status defaults to `draft`.
    pub async fn create(pool: &PgPool, input: &CreateContract) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts
                (project_id, contract_number, client_name, description, amount,
                 start_date, end_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'draft'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(input.project_id)
            .bind(&input.contract_number)
            .bind(&input.client_name)
            .bind(&input.description)
            .bind(input.amount)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List contracts, newest start date first.
    pub async fn list(
        pool: &PgPool,
        filter: &ContractFilter,
    ) -> Result<Vec<Contract>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contracts
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY start_date DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(filter.project_id)
            .bind(&filter.status)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a contract. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContract,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET
                contract_number = COALESCE($2, contract_number),
                client_name = COALESCE($3, client_name),
                description = COALESCE($4, description),
                amount = COALESCE($5, amount),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                status = COALESCE($8, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(&input.contract_number)
            .bind(&input.client_name)
            .bind(&input.description)
            .bind(input.amount)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Store the relative path of the signed contract document.
    pub async fn set_document_path(
        pool: &PgPool,
        id: DbId,
        path: &str,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query =
            format!("UPDATE contracts SET document_path = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
