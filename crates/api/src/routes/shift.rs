//! Route definitions for the `/shifts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::shift;
use crate::state::AppState;

/// Routes mounted at `/shifts`.
///
/// `/current` is a static segment and takes precedence over `/{id}`.
///
/// ```text
/// GET    /                         -> list
/// POST   /                         -> clock_in
/// GET    /current                  -> current
/// GET    /{id}                     -> get_by_id
/// POST   /{id}/clock-out           -> clock_out
/// POST   /{id}/confirm-overtime    -> confirm_overtime
/// POST   /{id}/reject-overtime     -> reject_overtime
/// POST   /{id}/cancel              -> cancel
/// POST   /{id}/rest                -> add_rest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shift::list).post(shift::clock_in))
        .route("/current", get(shift::current))
        .route("/{id}", get(shift::get_by_id))
        .route("/{id}/clock-out", post(shift::clock_out))
        .route("/{id}/confirm-overtime", post(shift::confirm_overtime))
        .route("/{id}/reject-overtime", post(shift::reject_overtime))
        .route("/{id}/cancel", post(shift::cancel))
        .route("/{id}/rest", post(shift::add_rest))
}
