//! Payroll summary model and DTOs.

use faena_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `payroll_summaries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayrollSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub shift_count: i64,
    pub regular_minutes: i64,
    pub overtime_minutes: i64,
    pub hourly_rate: Decimal,
    pub overtime_multiplier: Decimal,
    pub regular_pay: Decimal,
    pub overtime_pay: Decimal,
    pub total_pay: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values written by [`crate::repositories::PayrollSummaryRepo::upsert_all`].
#[derive(Debug, Clone)]
pub struct NewPayrollSummary {
    pub user_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub shift_count: i64,
    pub regular_minutes: i64,
    pub overtime_minutes: i64,
    pub hourly_rate: Decimal,
    pub overtime_multiplier: Decimal,
    pub regular_pay: Decimal,
    pub overtime_pay: Decimal,
    pub total_pay: Decimal,
}

/// Request body for generating payroll over a period.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePayroll {
    pub period_start: Date,
    pub period_end: Date,
    /// Restrict generation to one worker; all active workers otherwise.
    pub user_id: Option<DbId>,
}

/// Completed-shift minutes of one worker over a period.
#[derive(Debug, Clone, FromRow)]
pub struct ShiftTotals {
    pub user_id: DbId,
    pub hourly_rate: Decimal,
    pub shift_count: i64,
    pub regular_minutes: i64,
    pub overtime_minutes: i64,
}

/// Query filters for listing payroll summaries.
#[derive(Debug, Default, Deserialize)]
pub struct PayrollFilter {
    pub user_id: Option<DbId>,
    pub period_start: Option<Date>,
    pub period_end: Option<Date>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
