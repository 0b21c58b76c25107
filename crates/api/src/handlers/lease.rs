//! Handlers for the `/leases` resource (machine rentals billed to a project).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::lease::{lease_total, validate_lease, RateType};
use faena_core::types::DbId;
use faena_db::models::lease::{CreateLease, Lease, LeaseFilter, UpdateLease};
use faena_db::repositories::{LeaseRepo, MachineRepo, ProjectRepo};
use validator::Validate;

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Lease", id })
}

/// POST /api/v1/leases
pub async fn create(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<CreateLease>,
) -> AppResult<(StatusCode, Json<Lease>)> {
    input.validate()?;
    RateType::parse(&input.rate_type)?;
    check(validate_lease(
        input.rate,
        input.quantity,
        input.start_date,
        input.end_date,
    ))?;
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

    let total = lease_total(input.rate, input.quantity);
    let lease = LeaseRepo::create(&state.pool, &input, total).await?;
    tracing::info!(lease_id = lease.id, total = %lease.total, "Lease created");
    Ok((StatusCode::CREATED, Json(lease)))
}

/// GET /api/v1/leases?project_id=&machine_id=
pub async fn list(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Query(filter): Query<LeaseFilter>,
) -> AppResult<Json<Vec<Lease>>> {
    Ok(Json(LeaseRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/leases/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<Lease>> {
    let lease = LeaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(lease))
}

/// PUT /api/v1/leases/{id}
///
/// The total is recomputed from the merged rate and quantity.
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLease>,
) -> AppResult<Json<Lease>> {
    input.validate()?;
    if let Some(rate_type) = &input.rate_type {
        RateType::parse(rate_type)?;
    }
    let existing = LeaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let rate = input.rate.unwrap_or(existing.rate);
    let quantity = input.quantity.unwrap_or(existing.quantity);
    check(validate_lease(
        rate,
        quantity,
        input.start_date.unwrap_or(existing.start_date),
        input.end_date.or(existing.end_date),
    ))?;

    let lease = LeaseRepo::update(&state.pool, id, &input, lease_total(rate, quantity))
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(lease))
}

/// DELETE /api/v1/leases/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LeaseRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
