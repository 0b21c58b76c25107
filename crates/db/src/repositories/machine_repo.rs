//! Repository for the `machines` table.

use faena_core::search::{
    build_like_pattern, clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use faena_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::machine::{CreateMachine, Machine, MachineFilter, MachineUsage, UpdateMachine};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, machine_type, brand, model, plate, hour_meter, \
                        hourly_rate, maintenance_interval_hours, status, project_id, \
                        image_path, created_at, updated_at";

/// Provides CRUD operations for machines.
pub struct MachineRepo;

impl MachineRepo {
    /// Insert a new machine, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMachine) -> Result<Machine, sqlx::Error> {
        let query = format!(
            "INSERT INTO machines
                (code, name, machine_type, brand, model, plate, hour_meter, hourly_rate,
                 maintenance_interval_hours, status, project_id)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, 0),
                     COALESCE($9, 250), COALESCE($10, 'available'), $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Machine>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.machine_type)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.plate)
            .bind(input.hour_meter)
            .bind(input.hourly_rate)
            .bind(input.maintenance_interval_hours)
            .bind(&input.status)
            .bind(input.project_id)
            .fetch_one(pool)
            .await
    }

    /// Find a machine by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Machine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM machines WHERE id = $1");
        sqlx::query_as::<_, Machine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List machines ordered by code.
    pub async fn list(pool: &PgPool, filter: &MachineFilter) -> Result<Vec<Machine>, sqlx::Error> {
        let pattern = filter.q.as_deref().and_then(build_like_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM machines
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::TEXT IS NULL OR code ILIKE $3 OR name ILIKE $3 OR machine_type ILIKE $3)
             ORDER BY code
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Machine>(&query)
            .bind(filter.project_id)
            .bind(&filter.status)
            .bind(pattern)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a machine. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMachine,
    ) -> Result<Option<Machine>, sqlx::Error> {
        let query = format!(
            "UPDATE machines SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                machine_type = COALESCE($4, machine_type),
                brand = COALESCE($5, brand),
                model = COALESCE($6, model),
                plate = COALESCE($7, plate),
                hour_meter = COALESCE($8, hour_meter),
                hourly_rate = COALESCE($9, hourly_rate),
                maintenance_interval_hours = COALESCE($10, maintenance_interval_hours),
                status = COALESCE($11, status),
                project_id = COALESCE($12, project_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Machine>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.machine_type)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.plate)
            .bind(input.hour_meter)
            .bind(input.hourly_rate)
            .bind(input.maintenance_interval_hours)
            .bind(&input.status)
            .bind(input.project_id)
            .fetch_optional(pool)
            .await
    }

    /// Store the relative path of an uploaded machine photo.
    pub async fn set_image_path(
        pool: &PgPool,
        id: DbId,
        path: &str,
    ) -> Result<Option<Machine>, sqlx::Error> {
        let query = format!("UPDATE machines SET image_path = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Machine>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    /// Raise the hour meter to `reading` (never lowers it).
    pub async fn advance_hour_meter<'e, E>(
        executor: E,
        id: DbId,
        reading: Decimal,
    ) -> Result<bool, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let result =
            sqlx::query("UPDATE machines SET hour_meter = GREATEST(hour_meter, $2) WHERE id = $1")
                .bind(id)
                .bind(reading)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a machine by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM machines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hours and fuel aggregated from the machine's labor reports.
    pub async fn usage(pool: &PgPool, id: DbId) -> Result<MachineUsage, sqlx::Error> {
        sqlx::query_as::<_, MachineUsage>(
            "SELECT $1::BIGINT AS machine_id,
                    COUNT(*) AS report_count,
                    COALESCE(SUM(hours_worked), 0) AS total_hours,
                    COALESCE(SUM(fuel_liters), 0) AS total_fuel_liters,
                    MIN(report_date) AS first_report_date,
                    MAX(report_date) AS last_report_date
             FROM labor_reports
             WHERE machine_id = $1",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }
}
