//! Route definitions for the `/payroll` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::payroll;
use crate::state::AppState;

/// Routes mounted at `/payroll`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> generate
/// GET    /{id}    -> get_by_id
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(payroll::list).post(payroll::generate))
        .route("/{id}", get(payroll::get_by_id).delete(payroll::delete))
}
