//! Route definitions for file downloads.

use axum::routing::get;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// Routes mounted at `/exports`.
///
/// ```text
/// GET /shifts.xlsx                   -> shifts_xlsx (?from&to&user_id)
/// GET /payroll.xlsx                  -> payroll_xlsx (?period_start&period_end&user_id)
/// GET /current-accounts/{id}.xlsx    -> current_account
/// GET /current-accounts/{id}.pdf     -> current_account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shifts.xlsx", get(export::shifts_xlsx))
        .route("/payroll.xlsx", get(export::payroll_xlsx))
        .route("/current-accounts/{file}", get(export::current_account))
}
