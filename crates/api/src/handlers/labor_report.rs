//! Handlers for the `/labor-reports` resource.
//!
//! Operators file their own daily machine reports; supervisors see everyone's.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::labor::hours_worked;
use faena_core::types::DbId;
use faena_core::validation::validate_non_negative;
use faena_db::models::labor_report::{
    CreateLaborReport, LaborReport, LaborReportFilter, UpdateLaborReport,
};
use faena_db::repositories::{LaborReportRepo, MachineRepo, ProjectRepo, UserRepo};
use validator::Validate;

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "LaborReport",
        id,
    })
}

async fn find_owned(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<LaborReport> {
    let report = LaborReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    user.ensure_self_or_manager(report.user_id)?;
    Ok(report)
}

/// POST /api/v1/labor-reports
///
/// Hours come from the meter readings; the machine's hour meter advances to
/// the end reading.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateLaborReport>,
) -> AppResult<(StatusCode, Json<LaborReport>)> {
    input.validate()?;
    let hours = hours_worked(input.hour_meter_start, input.hour_meter_end)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if let Some(fuel) = input.fuel_liters {
        check(validate_non_negative("fuel_liters", fuel))?;
    }
    let operator = user.acting_for(input.user_id)?;

    UserRepo::find_by_id(&state.pool, operator)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: operator,
        }))?;
    MachineRepo::find_by_id(&state.pool, input.machine_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Machine",
            id: input.machine_id,
        }))?;
    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let report = LaborReportRepo::create(&state.pool, operator, &input, hours).await?;
    tracing::info!(
        report_id = report.id,
        machine_id = report.machine_id,
        hours = %report.hours_worked,
        "Labor report recorded"
    );
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/v1/labor-reports?project_id=&machine_id=&user_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(mut filter): Query<LaborReportFilter>,
) -> AppResult<Json<Vec<LaborReport>>> {
    if !user.is_manager() {
        filter.user_id = Some(user.user_id);
    }
    Ok(Json(LaborReportRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/labor-reports/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<LaborReport>> {
    Ok(Json(find_owned(&state, &user, id).await?))
}

/// PUT /api/v1/labor-reports/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLaborReport>,
) -> AppResult<Json<LaborReport>> {
    input.validate()?;
    if let Some(fuel) = input.fuel_liters {
        check(validate_non_negative("fuel_liters", fuel))?;
    }
    find_owned(&state, &user, id).await?;

    let report = LaborReportRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(report))
}

/// DELETE /api/v1/labor-reports/{id}
///
/// The machine's hour meter is left where it is.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state, &user, id).await?;
    if LaborReportRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
