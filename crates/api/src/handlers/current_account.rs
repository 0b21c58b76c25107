//! Handlers for the `/current-accounts` resource (cuenta corriente).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::account::AccountTotals;
use faena_core::error::CoreError;
use faena_core::payroll::validate_period;
use faena_core::types::DbId;
use faena_db::models::current_account::{
    CurrentAccountFilter, CurrentAccountReport, GenerateCurrentAccount, NewCurrentAccountReport,
};
use faena_db::repositories::{CurrentAccountReportRepo, ProjectRepo, ReportRepo};

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "CurrentAccountReport",
        id,
    })
}

/// POST /api/v1/current-accounts
///
/// Snapshot the project's lease, delivery and labor charges against the
/// payments received over the period.
pub async fn generate(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<GenerateCurrentAccount>,
) -> AppResult<(StatusCode, Json<CurrentAccountReport>)> {
    check(validate_period(input.period_start, input.period_end))?;
    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let sums = ReportRepo::account_sums(
        &state.pool,
        input.project_id,
        input.period_start,
        input.period_end,
    )
    .await?;
    let totals = AccountTotals::new(
        sums.lease_charges,
        sums.delivery_charges,
        sums.labor_charges,
        sums.total_payments,
    );

    let report = CurrentAccountReportRepo::create(
        &state.pool,
        &NewCurrentAccountReport {
            project_id: input.project_id,
            period_start: input.period_start,
            period_end: input.period_end,
            totals,
        },
    )
    .await?;
    tracing::info!(
        report_id = report.id,
        project_id = report.project_id,
        balance = %report.balance,
        settled = totals.is_settled(),
        "Current account generated"
    );
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/v1/current-accounts?project_id=
pub async fn list(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Query(filter): Query<CurrentAccountFilter>,
) -> AppResult<Json<Vec<CurrentAccountReport>>> {
    Ok(Json(
        CurrentAccountReportRepo::list(&state.pool, &filter).await?,
    ))
}

/// GET /api/v1/current-accounts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<CurrentAccountReport>> {
    let report = CurrentAccountReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(report))
}

/// DELETE /api/v1/current-accounts/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CurrentAccountReportRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
