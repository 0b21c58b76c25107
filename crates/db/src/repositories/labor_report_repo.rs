//! Repository for the `labor_reports` table.

use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::labor_report::{
    CreateLaborReport, LaborReport, LaborReportFilter, UpdateLaborReport,
};
use crate::repositories::MachineRepo;

const COLUMNS: &str = "id, user_id, machine_id, project_id, report_date, hour_meter_start, \
                        hour_meter_end, hours_worked, fuel_liters, description, \
                        created_at, updated_at";

/// Provides CRUD operations for daily machine labor reports.
pub struct LaborReportRepo;

impl LaborReportRepo {
    /// Insert a report and advance the machine's hour meter in one transaction.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateLaborReport,
        hours_worked: Decimal,
    ) -> Result<LaborReport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO labor_reports
                (user_id, machine_id, project_id, report_date, hour_meter_start,
                 hour_meter_end, hours_worked, fuel_liters, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, LaborReport>(&query)
            .bind(user_id)
            .bind(input.machine_id)
            .bind(input.project_id)
            .bind(input.report_date)
            .bind(input.hour_meter_start)
            .bind(input.hour_meter_end)
            .bind(hours_worked)
            .bind(input.fuel_liters)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        MachineRepo::advance_hour_meter(&mut *tx, report.machine_id, report.hour_meter_end).await?;

        tx.commit().await?;
        Ok(report)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LaborReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM labor_reports WHERE id = $1");
        sqlx::query_as::<_, LaborReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reports, most recent first.
    pub async fn list(
        pool: &PgPool,
        filter: &LaborReportFilter,
    ) -> Result<Vec<LaborReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM labor_reports
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
               AND ($2::BIGINT IS NULL OR machine_id = $2)
               AND ($3::BIGINT IS NULL OR user_id = $3)
             ORDER BY report_date DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, LaborReport>(&query)
            .bind(filter.project_id)
            .bind(filter.machine_id)
            .bind(filter.user_id)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Update the descriptive fields of a report.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLaborReport,
    ) -> Result<Option<LaborReport>, sqlx::Error> {
        let query = format!(
            "UPDATE labor_reports SET
                report_date = COALESCE($2, report_date),
                fuel_liters = COALESCE($3, fuel_liters),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LaborReport>(&query)
            .bind(id)
            .bind(input.report_date)
            .bind(input.fuel_liters)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM labor_reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
