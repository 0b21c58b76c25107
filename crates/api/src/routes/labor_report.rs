//! Route definitions for the `/labor-reports` resource (daily machine reports).

use axum::routing::get;
use axum::Router;

use crate::handlers::labor_report;
use crate::state::AppState;

/// Routes mounted at `/labor-reports`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(labor_report::list).post(labor_report::create))
        .route(
            "/{id}",
            get(labor_report::get_by_id)
                .put(labor_report::update)
                .delete(labor_report::delete),
        )
}
