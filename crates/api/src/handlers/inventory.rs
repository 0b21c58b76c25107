//! Handlers for `/products` and `/inventory-movements`.
//!
//! Stock only changes through movements; the product endpoints never write it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::inventory::MovementType;
use faena_core::types::DbId;
use faena_core::validation::validate_non_negative;
use faena_db::models::inventory::{
    CreateInventoryMovement, CreateProduct, InventoryMovement, MovementFilter, Product,
    ProductFilter, UpdateProduct,
};
use faena_db::repositories::{InventoryMovementRepo, ProductRepo, ProjectRepo, StockOutcome};
use serde::Serialize;
use validator::Validate;

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireManager};
use crate::state::AppState;

/// Response for a recorded movement: the ledger row and the product after it.
#[derive(Debug, Serialize)]
pub struct MovementResponse {
    pub movement: InventoryMovement,
    pub product: Product,
}

fn product_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    input.validate()?;
    if let Some(min_stock) = input.min_stock {
        check(validate_non_negative("min_stock", min_stock))?;
    }
    if let Some(unit_cost) = input.unit_cost {
        check(validate_non_negative("unit_cost", unit_cost))?;
    }

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = product.id, sku = %product.sku, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/products?low_stock=&q=
pub async fn list_products(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(ProductRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(Json(product))
}

/// PUT /api/v1/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    input.validate()?;
    if let Some(min_stock) = input.min_stock {
        check(validate_non_negative("min_stock", min_stock))?;
    }
    if let Some(unit_cost) = input.unit_cost {
        check(validate_non_negative("unit_cost", unit_cost))?;
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(Json(product))
}

/// DELETE /api/v1/products/{id}
///
/// Removes the product together with its movement history.
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProductRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(product_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Movements
// ---------------------------------------------------------------------------

/// POST /api/v1/inventory-movements
///
/// `in` and `out` are open to every user; `adjustment` overwrites the
/// counted stock and needs a supervisor or admin.
pub async fn record_movement(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateInventoryMovement>,
) -> AppResult<(StatusCode, Json<MovementResponse>)> {
    input.validate()?;
    let movement_type = MovementType::parse(&input.movement_type)?;
    if movement_type == MovementType::Adjustment && !user.is_manager() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Stock adjustments require a supervisor or admin".into(),
        )));
    }
    if let Some(unit_cost) = input.unit_cost {
        check(validate_non_negative("unit_cost", unit_cost))?;
    }
    if let Some(project_id) = input.project_id {
        ProjectRepo::find_by_id(&state.pool, project_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }))?;
    }

    match InventoryMovementRepo::record(&state.pool, user.user_id, &input, movement_type).await? {
        StockOutcome::Recorded { movement, product } => {
            tracing::info!(
                movement_id = movement.id,
                product_id = product.id,
                movement_type = movement_type.as_str(),
                stock = %product.stock,
                "Inventory movement recorded"
            );
            Ok((StatusCode::CREATED, Json(MovementResponse { movement, product })))
        }
        StockOutcome::ProductNotFound => Err(product_not_found(input.product_id)),
        StockOutcome::Rejected(err) => Err(AppError::Core(err)),
    }
}

/// GET /api/v1/inventory-movements?product_id=&project_id=
pub async fn list_movements(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(filter): Query<MovementFilter>,
) -> AppResult<Json<Vec<InventoryMovement>>> {
    Ok(Json(InventoryMovementRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/inventory-movements/{id}
pub async fn get_movement(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<InventoryMovement>> {
    let movement = InventoryMovementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "InventoryMovement",
            id,
        }))?;
    Ok(Json(movement))
}
