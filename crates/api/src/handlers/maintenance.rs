//! Handlers for the `/maintenance` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::maintenance::MaintenanceType;
use faena_core::types::DbId;
use faena_core::validation::validate_non_negative;
use faena_db::models::maintenance::{
    CreateMaintenanceRecord, MaintenanceFilter, MaintenanceRecord, UpdateMaintenanceRecord,
};
use faena_db::repositories::{MachineRepo, MaintenanceRecordRepo};
use rust_decimal::Decimal;
use validator::Validate;

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireManager};
use crate::state::AppState;
use crate::uploads::{self, IMAGE_EXTENSIONS};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MaintenanceRecord",
        id,
    })
}

fn check_amounts(hour_meter: Option<Decimal>, cost: Option<Decimal>) -> AppResult<()> {
    if let Some(value) = hour_meter {
        check(validate_non_negative("hour_meter", value))?;
    }
    if let Some(value) = cost {
        check(validate_non_negative("cost", value))?;
    }
    Ok(())
}

/// POST /api/v1/maintenance
pub async fn create(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<CreateMaintenanceRecord>,
) -> AppResult<(StatusCode, Json<MaintenanceRecord>)> {
    input.validate()?;
    let kind = MaintenanceType::parse(&input.maintenance_type)?;
    check_amounts(Some(input.hour_meter), input.cost)?;
    MachineRepo::find_by_id(&state.pool, input.machine_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Machine",
            id: input.machine_id,
        }))?;

    let record = MaintenanceRecordRepo::create(&state.pool, &input).await?;
    tracing::info!(
        record_id = record.id,
        machine_id = record.machine_id,
        maintenance_type = kind.as_str(),
        "Maintenance recorded"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/maintenance?machine_id=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(filter): Query<MaintenanceFilter>,
) -> AppResult<Json<Vec<MaintenanceRecord>>> {
    Ok(Json(MaintenanceRecordRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/maintenance/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<MaintenanceRecord>> {
    let record = MaintenanceRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(record))
}

/// PUT /api/v1/maintenance/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaintenanceRecord>,
) -> AppResult<Json<MaintenanceRecord>> {
    input.validate()?;
    if let Some(kind) = &input.maintenance_type {
        MaintenanceType::parse(kind)?;
    }
    check_amounts(input.hour_meter, input.cost)?;

    let record = MaintenanceRecordRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(record))
}

/// DELETE /api/v1/maintenance/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MaintenanceRecordRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/maintenance/{id}/photo (multipart, field `file`)
pub async fn upload_photo(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<MaintenanceRecord>> {
    let current = MaintenanceRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let upload = uploads::read_file_field(multipart).await?;
    uploads::validate_extension(&upload.file_name, IMAGE_EXTENSIONS)?;

    let pool = &state.pool;
    let record = uploads::replace(
        state.upload_dir(),
        "maintenance",
        id,
        &upload,
        current.photo_path.as_deref(),
        |path| async move { MaintenanceRecordRepo::set_photo_path(pool, id, &path).await },
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    Ok(Json(record))
}
