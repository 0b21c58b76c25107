//! Route definitions for the `/contracts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contract;
use crate::state::AppState;

/// Routes mounted at `/contracts`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/document  -> upload_document (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contract::list).post(contract::create))
        .route(
            "/{id}",
            get(contract::get_by_id)
                .put(contract::update)
                .delete(contract::delete),
        )
        .route("/{id}/document", post(contract::upload_document))
}
