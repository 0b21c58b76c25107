//! Handlers for the `/machines` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::maintenance::{maintenance_due, MaintenanceStatus};
use faena_core::status::VALID_MACHINE_STATUSES;
use faena_core::types::DbId;
use faena_core::validation::{validate_non_negative, validate_one_of, validate_positive};
use faena_db::models::machine::{CreateMachine, Machine, MachineFilter, MachineUsage, UpdateMachine};
use faena_db::models::maintenance::MaintenanceRecord;
use faena_db::repositories::{MachineRepo, MaintenanceRecordRepo, ProjectRepo};
use rust_decimal::Decimal;
use serde::Serialize;
use validator::Validate;

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireManager};
use crate::state::AppState;
use crate::uploads::{self, IMAGE_EXTENSIONS};

/// Response for `GET /machines/{id}/maintenance-status`.
#[derive(Debug, Serialize)]
pub struct MaintenanceStatusResponse {
    pub machine_id: DbId,
    pub hour_meter: Decimal,
    pub maintenance_interval_hours: Decimal,
    /// Most recent preventive service, if any.
    pub last_service: Option<MaintenanceRecord>,
    #[serde(flatten)]
    pub status: MaintenanceStatus,
}

fn check_numbers(
    hour_meter: Option<Decimal>,
    hourly_rate: Option<Decimal>,
    interval: Option<Decimal>,
) -> AppResult<()> {
    if let Some(value) = hour_meter {
        check(validate_non_negative("hour_meter", value))?;
    }
    if let Some(value) = hourly_rate {
        check(validate_non_negative("hourly_rate", value))?;
    }
    if let Some(value) = interval {
        check(validate_positive("maintenance_interval_hours", value))?;
    }
    Ok(())
}

async fn ensure_project(state: &AppState, project_id: Option<DbId>) -> AppResult<()> {
    if let Some(id) = project_id {
        ProjectRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            }))?;
    }
    Ok(())
}

async fn find_machine(state: &AppState, id: DbId) -> AppResult<Machine> {
    MachineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Machine",
            id,
        }))
}

/// POST /api/v1/machines
pub async fn create(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<CreateMachine>,
) -> AppResult<(StatusCode, Json<Machine>)> {
    input.validate()?;
    if let Some(status) = &input.status {
        check(validate_one_of("status", status, VALID_MACHINE_STATUSES))?;
    }
    check_numbers(
        input.hour_meter,
        input.hourly_rate,
        input.maintenance_interval_hours,
    )?;
    ensure_project(&state, input.project_id).await?;

    let machine = MachineRepo::create(&state.pool, &input).await?;
    tracing::info!(machine_id = machine.id, code = %machine.code, "Machine created");
    Ok((StatusCode::CREATED, Json(machine)))
}

/// GET /api/v1/machines?project_id=&status=&q=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(filter): Query<MachineFilter>,
) -> AppResult<Json<Vec<Machine>>> {
    let machines = MachineRepo::list(&state.pool, &filter).await?;
    Ok(Json(machines))
}

/// GET /api/v1/machines/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Machine>> {
    Ok(Json(find_machine(&state, id).await?))
}

/// PUT /api/v1/machines/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMachine>,
) -> AppResult<Json<Machine>> {
    input.validate()?;
    if let Some(status) = &input.status {
        check(validate_one_of("status", status, VALID_MACHINE_STATUSES))?;
    }
    check_numbers(
        input.hour_meter,
        input.hourly_rate,
        input.maintenance_interval_hours,
    )?;
    ensure_project(&state, input.project_id).await?;

    let machine = MachineRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Machine",
            id,
        }))?;
    Ok(Json(machine))
}

/// DELETE /api/v1/machines/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MachineRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Machine",
            id,
        }))
    }
}

/// GET /api/v1/machines/{id}/usage
pub async fn usage(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<MachineUsage>> {
    find_machine(&state, id).await?;
    let usage = MachineRepo::usage(&state.pool, id).await?;
    Ok(Json(usage))
}

/// GET /api/v1/machines/{id}/maintenance-status
pub async fn maintenance_status(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<MaintenanceStatusResponse>> {
    let machine = find_machine(&state, id).await?;
    let last_service = MaintenanceRecordRepo::last_for_machine(&state.pool, id).await?;

    let status = maintenance_due(
        machine.hour_meter,
        last_service.as_ref().map(|r| r.hour_meter),
        machine.maintenance_interval_hours,
    );

    Ok(Json(MaintenanceStatusResponse {
        machine_id: machine.id,
        hour_meter: machine.hour_meter,
        maintenance_interval_hours: machine.maintenance_interval_hours,
        last_service,
        status,
    }))
}

/// POST /api/v1/machines/{id}/image (multipart, field `file`)
pub async fn upload_image(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Machine>> {
    let current = find_machine(&state, id).await?;
    let upload = uploads::read_file_field(multipart).await?;
    uploads::validate_extension(&upload.file_name, IMAGE_EXTENSIONS)?;

    let pool = &state.pool;
    let machine = uploads::replace(
        state.upload_dir(),
        "machines",
        id,
        &upload,
        current.image_path.as_deref(),
        |path| async move { MachineRepo::set_image_path(pool, id, &path).await },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Machine",
        id,
    }))?;
    Ok(Json(machine))
}
