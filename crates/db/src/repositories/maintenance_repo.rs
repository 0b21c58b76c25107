//! Repository for the `maintenance_records` table.

use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::types::DbId;
use sqlx::PgPool;

use crate::models::maintenance::{
    CreateMaintenanceRecord, MaintenanceFilter, MaintenanceRecord, UpdateMaintenanceRecord,
};

const COLUMNS: &str = "id, machine_id, maintenance_type, description, hour_meter, cost, \
                        performed_at, performed_by, photo_path, created_at, updated_at";

/// Provides CRUD operations for maintenance records.
pub struct MaintenanceRecordRepo;

impl MaintenanceRecordRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMaintenanceRecord,
    ) -> Result<MaintenanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_records
                (machine_id, maintenance_type, description, hour_meter, cost, performed_at, performed_by)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(input.machine_id)
            .bind(&input.maintenance_type)
            .bind(&input.description)
            .bind(input.hour_meter)
            .bind(input.cost)
            .bind(input.performed_at)
            .bind(&input.performed_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_records WHERE id = $1");
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List records, most recent service first.
    pub async fn list(
        pool: &PgPool,
        filter: &MaintenanceFilter,
    ) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_records
             WHERE ($1::BIGINT IS NULL OR machine_id = $1)
             ORDER BY performed_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(filter.machine_id)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Most recent preventive service of a machine, by hour meter.
    pub async fn last_for_machine(
        pool: &PgPool,
        machine_id: DbId,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_records
             WHERE machine_id = $1 AND maintenance_type = 'preventive'
             ORDER BY hour_meter DESC, performed_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(machine_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaintenanceRecord,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_records SET
                maintenance_type = COALESCE($2, maintenance_type),
                description = COALESCE($3, description),
                hour_meter = COALESCE($4, hour_meter),
                cost = COALESCE($5, cost),
                performed_at = COALESCE($6, performed_at),
                performed_by = COALESCE($7, performed_by)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .bind(&input.maintenance_type)
            .bind(&input.description)
            .bind(input.hour_meter)
            .bind(input.cost)
            .bind(input.performed_at)
            .bind(&input.performed_by)
            .fetch_optional(pool)
            .await
    }

    /// Store the relative path of a service photo.
    pub async fn set_photo_path(
        pool: &PgPool,
        id: DbId,
        path: &str,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_records SET photo_path = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
