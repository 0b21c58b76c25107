//! Work shift (jornada laboral) model and DTOs.

use faena_core::error::CoreError;
use faena_core::shift::{ShiftClock, ShiftStatus};
use faena_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `work_shifts` table.
///
/// `worked_minutes`, `regular_minutes` and `overtime_minutes` are snapshots
/// written on every transition; open shifts are recomputed on read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkShift {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub status: String,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub paused_at: Option<Timestamp>,
    pub rest_minutes: i64,
    pub worked_minutes: i64,
    pub regular_minutes: i64,
    pub overtime_minutes: i64,
    pub overtime_confirmed: Option<bool>,
    pub auto_paused: bool,
    pub auto_finalized: bool,
    pub notes: Option<String>,
    /// Optimistic lock counter, incremented by every transition.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WorkShift {
    /// Parsed status of this row.
    pub fn shift_status(&self) -> Result<ShiftStatus, CoreError> {
        ShiftStatus::parse(&self.status)
    }

    /// The temporal state the shift engine operates on.
    pub fn clock(&self) -> Result<ShiftClock, CoreError> {
        Ok(ShiftClock {
            status: self.shift_status()?,
            started_at: self.started_at,
            ended_at: self.ended_at,
            paused_at: self.paused_at,
            rest_minutes: self.rest_minutes,
            overtime_confirmed: self.overtime_confirmed,
            auto_paused: self.auto_paused,
            auto_finalized: self.auto_finalized,
        })
    }
}

/// Clock-in request body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StartShift {
    /// Worker to clock in; defaults to the authenticated user.
    pub user_id: Option<DbId>,
    pub project_id: Option<DbId>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Break request body for `POST /shifts/{id}/rest`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddRest {
    #[validate(range(min = 1, max = 780))]
    pub minutes: i64,
}

/// Query filters for listing shifts.
#[derive(Debug, Default, Deserialize)]
pub struct WorkShiftFilter {
    pub user_id: Option<DbId>,
    pub status: Option<String>,
    /// Inclusive lower bound on `started_at`.
    pub from: Option<Timestamp>,
    /// Exclusive upper bound on `started_at`.
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
