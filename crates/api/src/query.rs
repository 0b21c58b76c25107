//! Shared query parameter types for API handlers.

use faena_core::types::{Date, DbId};
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the repository layer via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    #[serde(default)]
    pub include_inactive: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Inclusive date window (`?period_start=&period_end=`), used by exports.
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub period_start: Date,
    pub period_end: Date,
    pub user_id: Option<DbId>,
}

/// Inclusive calendar range (`?from=&to=`), used by the shift export.
#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub from: Date,
    pub to: Date,
    pub user_id: Option<DbId>,
}
