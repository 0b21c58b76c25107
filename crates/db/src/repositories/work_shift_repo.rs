//! Repository for the `work_shifts` table.
//!
//! State changes never overwrite blindly: [`WorkShiftRepo::apply_transition`]
//! only writes when the row still carries the `version` the caller read, so
//! two transitions computed from the same snapshot cannot both land.

use faena_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faena_core::shift::{ShiftTransition, STATUS_COMPLETED};
use faena_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::payroll::ShiftTotals;
use crate::models::work_shift::{WorkShift, WorkShiftFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, project_id, status, started_at, ended_at, paused_at, \
                        rest_minutes, worked_minutes, regular_minutes, overtime_minutes, \
                        overtime_confirmed, auto_paused, auto_finalized, notes, version, \
                        created_at, updated_at";

/// Provides persistence for work shifts.
pub struct WorkShiftRepo;

impl WorkShiftRepo {
    /// Clock a worker in.
    ///
    /// Fails with a unique violation on `uq_work_shifts_open_per_user` when the
    /// worker already has an open shift.
    pub async fn start(
        pool: &PgPool,
        user_id: DbId,
        project_id: Option<DbId>,
        notes: Option<&str>,
    ) -> Result<WorkShift, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_shifts (user_id, project_id, notes)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkShift>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkShift>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_shifts WHERE id = $1");
        sqlx::query_as::<_, WorkShift>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The worker's active or paused shift, if any.
    pub async fn find_open_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<WorkShift>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_shifts
             WHERE user_id = $1 AND status IN ('active', 'paused')"
        );
        sqlx::query_as::<_, WorkShift>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Every open shift, oldest first. Input of the background sweep.
    pub async fn list_open(pool: &PgPool) -> Result<Vec<WorkShift>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_shifts
             WHERE status IN ('active', 'paused')
             ORDER BY started_at, id"
        );
        sqlx::query_as::<_, WorkShift>(&query).fetch_all(pool).await
    }

    /// List shifts, most recently started first.
    pub async fn list(
        pool: &PgPool,
        filter: &WorkShiftFilter,
    ) -> Result<Vec<WorkShift>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_shifts
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::TIMESTAMPTZ IS NULL OR started_at >= $3)
               AND ($4::TIMESTAMPTZ IS NULL OR started_at < $4)
             ORDER BY started_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, WorkShift>(&query)
            .bind(filter.user_id)
            .bind(&filter.status)
            .bind(filter.from)
            .bind(filter.to)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Persist `next`, computed from `read`, if nobody changed the row since.
    ///
    /// Returns `None` when the row is gone or its version moved on.
    pub async fn apply_transition(
        pool: &PgPool,
        read: &WorkShift,
        next: &ShiftTransition,
    ) -> Result<Option<WorkShift>, sqlx::Error> {
        let query = format!(
            "UPDATE work_shifts SET
                status = $3,
                ended_at = $4,
                paused_at = $5,
                rest_minutes = $6,
                overtime_confirmed = $7,
                auto_paused = $8,
                auto_finalized = $9,
                worked_minutes = $10,
                regular_minutes = $11,
                overtime_minutes = $12,
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkShift>(&query)
            .bind(read.id)
            .bind(read.version)
            .bind(next.status.as_str())
            .bind(next.ended_at)
            .bind(next.paused_at)
            .bind(next.rest_minutes)
            .bind(next.overtime_confirmed)
            .bind(next.auto_paused)
            .bind(next.auto_finalized)
            .bind(next.hours.worked_minutes)
            .bind(next.hours.regular_minutes)
            .bind(next.hours.overtime_minutes)
            .fetch_optional(pool)
            .await
    }

    /// Users with at least one completed shift started within `[from, to]`.
    pub async fn users_with_completed_in_period(
        pool: &PgPool,
        from: Date,
        to: Date,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT user_id FROM work_shifts
             WHERE status = $1 AND started_at::date BETWEEN $2 AND $3
             ORDER BY user_id",
        )
        .bind(STATUS_COMPLETED)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Completed shifts started within `[from, to]` (calendar days, inclusive).
    pub async fn list_completed_in_period(
        pool: &PgPool,
        user_id: Option<DbId>,
        from: Date,
        to: Date,
    ) -> Result<Vec<WorkShift>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_shifts
             WHERE status = $1
               AND ($2::BIGINT IS NULL OR user_id = $2)
               AND started_at::date BETWEEN $3 AND $4
             ORDER BY user_id, started_at"
        );
        sqlx::query_as::<_, WorkShift>(&query)
            .bind(STATUS_COMPLETED)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Sum of completed-shift minutes for one worker over `[from, to]`.
    ///
    /// Returns `None` if the user does not exist. A user without shifts yields
    /// zero totals.
    pub async fn totals_for_period(
        pool: &PgPool,
        user_id: DbId,
        from: Date,
        to: Date,
    ) -> Result<Option<ShiftTotals>, sqlx::Error> {
        sqlx::query_as::<_, ShiftTotals>(
            "SELECT u.id AS user_id,
                    u.hourly_rate,
                    COUNT(s.id) AS shift_count,
                    COALESCE(SUM(s.regular_minutes), 0)::BIGINT AS regular_minutes,
                    COALESCE(SUM(s.overtime_minutes), 0)::BIGINT AS overtime_minutes
             FROM users u
             LEFT JOIN work_shifts s
                    ON s.user_id = u.id
                   AND s.status = $4
                   AND s.started_at::date BETWEEN $2 AND $3
             WHERE u.id = $1
             GROUP BY u.id, u.hourly_rate",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .bind(STATUS_COMPLETED)
        .fetch_optional(pool)
        .await
    }
}
