//! Route definitions for products and the inventory movement ledger.

use axum::routing::get;
use axum::Router;

use crate::handlers::inventory;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /        -> list_products (?low_stock=true)
/// POST   /        -> create_product
/// GET    /{id}    -> get_product
/// PUT    /{id}    -> update_product
/// DELETE /{id}    -> delete_product
/// ```
pub fn product_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(inventory::list_products).post(inventory::create_product),
        )
        .route(
            "/{id}",
            get(inventory::get_product)
                .put(inventory::update_product)
                .delete(inventory::delete_product),
        )
}

/// Routes mounted at `/inventory-movements`. Movements are append-only.
///
/// ```text
/// GET    /        -> list_movements (?product_id=)
/// POST   /        -> record_movement
/// GET    /{id}    -> get_movement
/// ```
pub fn movement_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(inventory::list_movements).post(inventory::record_movement),
        )
        .route("/{id}", get(inventory::get_movement))
}
