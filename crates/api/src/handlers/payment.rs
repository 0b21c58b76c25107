//! Handlers for the `/payments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::status::VALID_PAYMENT_METHODS;
use faena_core::types::DbId;
use faena_core::validation::{validate_one_of, validate_positive};
use faena_db::models::payment::{CreatePayment, Payment, PaymentFilter, UpdatePayment};
use faena_db::repositories::{ContractRepo, PaymentRepo, ProjectRepo};
use validator::Validate;

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Payment",
        id,
    })
}

/// A payment's contract must belong to the payment's project.
async fn ensure_contract_in_project(
    state: &AppState,
    contract_id: DbId,
    project_id: DbId,
) -> AppResult<()> {
    let contract = ContractRepo::find_by_id(&state.pool, contract_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contract",
            id: contract_id,
        }))?;
    if contract.project_id != project_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Contract {contract_id} does not belong to project {project_id}"
        ))));
    }
    Ok(())
}

/// POST /api/v1/payments
pub async fn create(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    input.validate()?;
    check(validate_positive("amount", input.amount))?;
    check(validate_one_of("method", &input.method, VALID_PAYMENT_METHODS))?;
    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;
    if let Some(contract_id) = input.contract_id {
        ensure_contract_in_project(&state, contract_id, input.project_id).await?;
    }

    let payment = PaymentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        payment_id = payment.id,
        project_id = payment.project_id,
        amount = %payment.amount,
        "Payment recorded"
    );
    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /api/v1/payments?project_id=&contract_id=
pub async fn list(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Query(filter): Query<PaymentFilter>,
) -> AppResult<Json<Vec<Payment>>> {
    Ok(Json(PaymentRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/payments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(payment))
}

/// PUT /api/v1/payments/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePayment>,
) -> AppResult<Json<Payment>> {
    input.validate()?;
    if let Some(amount) = input.amount {
        check(validate_positive("amount", amount))?;
    }
    if let Some(method) = &input.method {
        check(validate_one_of("method", method, VALID_PAYMENT_METHODS))?;
    }
    let existing = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if let Some(contract_id) = input.contract_id {
        ensure_contract_in_project(&state, contract_id, existing.project_id).await?;
    }

    let payment = PaymentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(payment))
}

/// DELETE /api/v1/payments/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PaymentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
