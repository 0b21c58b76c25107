//! Route definitions for the `/leases` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::lease;
use crate::state::AppState;

/// Routes mounted at `/leases`.
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
        .route("/", get(lease::list).post(lease::create))
        .route(
            "/{id}",
            get(lease::get_by_id)
                .put(lease::update)
                .delete(lease::delete),
        )
}
