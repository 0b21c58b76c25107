//! Route definitions for the `/maintenance` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// Routes mounted at `/maintenance`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/photo     -> upload_photo (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(maintenance::list).post(maintenance::create))
        .route(
            "/{id}",
            get(maintenance::get_by_id)
                .put(maintenance::update)
                .delete(maintenance::delete),
        )
        .route("/{id}/photo", post(maintenance::upload_photo))
}
