//! Handlers for the `/contracts` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::status::VALID_CONTRACT_STATUSES;
use faena_core::types::DbId;
use faena_core::validation::{validate_date_range, validate_non_negative, validate_one_of};
use faena_db::models::contract::{Contract, ContractFilter, CreateContract, UpdateContract};
use faena_db::repositories::{ContractRepo, ProjectRepo};
use validator::Validate;

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::state::AppState;
use crate::uploads::{self, DOCUMENT_EXTENSIONS};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contract",
        id,
    })
}

/// POST /api/v1/contracts
pub async fn create(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<CreateContract>,
) -> AppResult<(StatusCode, Json<Contract>)> {
    input.validate()?;
    check(validate_non_negative("amount", input.amount))?;
    check(validate_date_range(input.start_date, input.end_date))?;
    if let Some(status) = &input.status {
        check(validate_one_of("status", status, VALID_CONTRACT_STATUSES))?;
    }
    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let contract = ContractRepo::create(&state.pool, &input).await?;
    tracing::info!(
        contract_id = contract.id,
        project_id = contract.project_id,
        "Contract created"
    );
    Ok((StatusCode::CREATED, Json(contract)))
}

/// GET /api/v1/contracts?project_id=&status=
pub async fn list(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Query(filter): Query<ContractFilter>,
) -> AppResult<Json<Vec<Contract>>> {
    Ok(Json(ContractRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/contracts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<Contract>> {
    let contract = ContractRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(contract))
}

/// PUT /api/v1/contracts/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContract>,
) -> AppResult<Json<Contract>> {
    input.validate()?;
    if let Some(amount) = input.amount {
        check(validate_non_negative("amount", amount))?;
    }
    if let Some(status) = &input.status {
        check(validate_one_of("status", status, VALID_CONTRACT_STATUSES))?;
    }
    let existing = ContractRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    check(validate_date_range(
        input.start_date.unwrap_or(existing.start_date),
        input.end_date.or(existing.end_date),
    ))?;

    let contract = ContractRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(contract))
}

/// DELETE /api/v1/contracts/{id}
///
/// Payments linked to the contract stay on the project with `contract_id` cleared.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContractRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/contracts/{id}/document (multipart, field `file`)
pub async fn upload_document(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Contract>> {
    let current = ContractRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let upload = uploads::read_file_field(multipart).await?;
    uploads::validate_extension(&upload.file_name, DOCUMENT_EXTENSIONS)?;

    let pool = &state.pool;
    let contract = uploads::replace(
        state.upload_dir(),
        "contracts",
        id,
        &upload,
        current.document_path.as_deref(),
        |path| async move { ContractRepo::set_document_path(pool, id, &path).await },
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    Ok(Json(contract))
}
