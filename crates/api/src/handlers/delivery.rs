//! Handlers for the `/deliveries` resource (aggregate material drop-offs).

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::types::DbId;
use faena_core::validation::{validate_non_negative, validate_positive};
use faena_db::models::delivery::{
    AggregateDelivery, CreateAggregateDelivery, DeliveryFilter, UpdateAggregateDelivery,
};
use faena_db::repositories::{AggregateDeliveryRepo, ProjectRepo};
use validator::Validate;

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireManager};
use crate::state::AppState;
use crate::uploads::{self, DOCUMENT_EXTENSIONS};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "AggregateDelivery",
        id,
    })
}

/// POST /api/v1/deliveries
pub async fn create(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<CreateAggregateDelivery>,
) -> AppResult<(StatusCode, Json<AggregateDelivery>)> {
    input.validate()?;
    check(validate_positive("volume_m3", input.volume_m3))?;
    check(validate_non_negative("unit_price", input.unit_price))?;
    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let delivery = AggregateDeliveryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        delivery_id = delivery.id,
        project_id = delivery.project_id,
        volume_m3 = %delivery.volume_m3,
        "Aggregate delivery recorded"
    );
    Ok((StatusCode::CREATED, Json(delivery)))
}

/// GET /api/v1/deliveries?project_id=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(filter): Query<DeliveryFilter>,
) -> AppResult<Json<Vec<AggregateDelivery>>> {
    Ok(Json(AggregateDeliveryRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/deliveries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<AggregateDelivery>> {
    let delivery = AggregateDeliveryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(delivery))
}

/// PUT /api/v1/deliveries/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAggregateDelivery>,
) -> AppResult<Json<AggregateDelivery>> {
    input.validate()?;
    if let Some(volume) = input.volume_m3 {
        check(validate_positive("volume_m3", volume))?;
    }
    if let Some(price) = input.unit_price {
        check(validate_non_negative("unit_price", price))?;
    }

    let delivery = AggregateDeliveryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(delivery))
}

/// DELETE /api/v1/deliveries/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AggregateDeliveryRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/deliveries/{id}/ticket (multipart, field `file`)
pub async fn upload_ticket(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<AggregateDelivery>> {
    let current = AggregateDeliveryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let upload = uploads::read_file_field(multipart).await?;
    uploads::validate_extension(&upload.file_name, DOCUMENT_EXTENSIONS)?;

    let pool = &state.pool;
    let delivery = uploads::replace(
        state.upload_dir(),
        "deliveries",
        id,
        &upload,
        current.ticket_path.as_deref(),
        |path| async move { AggregateDeliveryRepo::set_ticket_path(pool, id, &path).await },
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    Ok(Json(delivery))
}
