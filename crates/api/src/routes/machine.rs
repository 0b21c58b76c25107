//! Route definitions for the `/machines` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::machine;
use crate::state::AppState;

/// Routes mounted at `/machines`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// GET    /{id}/usage                -> usage
/// GET    /{id}/maintenance-status   -> maintenance_status
/// POST   /{id}/image                -> upload_image (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(machine::list).post(machine::create))
        .route(
            "/{id}",
            get(machine::get_by_id)
                .put(machine::update)
                .delete(machine::delete),
        )
        .route("/{id}/usage", get(machine::usage))
        .route("/{id}/maintenance-status", get(machine::maintenance_status))
        .route("/{id}/image", post(machine::upload_image))
}
