use axum::routing::get;
use axum::Router;

use crate::handlers::current_account;
use crate::state::AppState;

/// Routes mounted at `/current-accounts`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> generate
/// GET    /{id}    -> get_by_id
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(current_account::list).post(current_account::generate),
        )
        .route(
            "/{id}",
            get(current_account::get_by_id).delete(current_account::delete),
        )
}
