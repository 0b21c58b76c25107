//! Handlers for the `/payroll` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::payroll::{compute_pay, validate_period, OVERTIME_MULTIPLIER};
use faena_core::types::DbId;
use faena_db::models::payroll::{
    GeneratePayroll, NewPayrollSummary, PayrollFilter, PayrollSummary,
};
use faena_db::repositories::{PayrollSummaryRepo, WorkShiftRepo};

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::response::{self, DataResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PayrollSummary",
        id,
    })
}

/// POST /api/v1/payroll
///
/// Summarises completed shifts started within the period, one row per worker.
/// Regenerating a period replaces the earlier rows. Without `user_id`, every
/// worker with at least one completed shift in the period gets a row, whether
/// or not the account is still active. All rows are computed first and then
/// written in one transaction.
pub async fn generate(
    State(state): State<AppState>,
    RequireManager(manager): RequireManager,
    Json(input): Json<GeneratePayroll>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<PayrollSummary>>>)> {
    check(validate_period(input.period_start, input.period_end))?;

    let user_ids = match input.user_id {
        Some(id) => vec![id],
        None => {
            WorkShiftRepo::users_with_completed_in_period(
                &state.pool,
                input.period_start,
                input.period_end,
            )
            .await?
        }
    };

    let mut rows = Vec::with_capacity(user_ids.len());
    for user_id in user_ids {
        let totals = WorkShiftRepo::totals_for_period(
            &state.pool,
            user_id,
            input.period_start,
            input.period_end,
        )
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

        let pay = compute_pay(
            totals.regular_minutes,
            totals.overtime_minutes,
            totals.hourly_rate,
            OVERTIME_MULTIPLIER,
        );
        rows.push(NewPayrollSummary {
            user_id,
            period_start: input.period_start,
            period_end: input.period_end,
            shift_count: totals.shift_count,
            regular_minutes: totals.regular_minutes,
            overtime_minutes: totals.overtime_minutes,
            hourly_rate: totals.hourly_rate,
            overtime_multiplier: OVERTIME_MULTIPLIER,
            regular_pay: pay.regular_pay,
            overtime_pay: pay.overtime_pay,
            total_pay: pay.total_pay,
        });
    }

    let summaries = PayrollSummaryRepo::upsert_all(&state.pool, &rows).await?;

    tracing::info!(
        generated_by = manager.user_id,
        period_start = %input.period_start,
        period_end = %input.period_end,
        count = summaries.len(),
        "Payroll generated"
    );
    Ok((StatusCode::CREATED, response::data(summaries)))
}

/// GET /api/v1/payroll?user_id=&period_start=&period_end=
pub async fn list(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Query(filter): Query<PayrollFilter>,
) -> AppResult<Json<Vec<PayrollSummary>>> {
    Ok(Json(PayrollSummaryRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/payroll/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<PayrollSummary>> {
    let summary = PayrollSummaryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(summary))
}

/// DELETE /api/v1/payroll/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PayrollSummaryRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
