//! Route definitions for the `/expenses` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::expense;
use crate::state::AppState;

/// Routes mounted at `/expenses`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/receipt   -> upload_receipt (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(expense::list).post(expense::create))
        .route(
            "/{id}",
            get(expense::get_by_id)
                .put(expense::update)
                .delete(expense::delete),
        )
        .route("/{id}/receipt", post(expense::upload_receipt))
}
