//! Handlers for the `/shifts` resource (jornada laboral).
//!
//! Every state change goes through `faena_core::shift` and is persisted with
//! a compare-and-set on the row version it was computed from, so a concurrent
//! sweep or a second device never overwrites a newer state.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use faena_core::error::CoreError;
use faena_core::shift::{self, ShiftClock, ShiftStatus, ShiftTransition};
use faena_core::types::{DbId, Timestamp};
use faena_db::models::work_shift::{AddRest, StartShift, WorkShift, WorkShiftFilter};
use faena_db::repositories::{ProjectRepo, UserRepo, WorkShiftRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{self, DataResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "WorkShift",
        id,
    })
}

/// Overwrite the stored hour snapshot of an open shift with the live value.
fn with_live_hours(mut shift: WorkShift, now: Timestamp) -> AppResult<WorkShift> {
    if shift.shift_status()?.is_open() {
        let hours = shift::breakdown(&shift.clock()?, now);
        shift.worked_minutes = hours.worked_minutes;
        shift.regular_minutes = hours.regular_minutes;
        shift.overtime_minutes = hours.overtime_minutes;
    }
    Ok(shift)
}

async fn find_owned(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<WorkShift> {
    let shift = WorkShiftRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    user.ensure_self_or_manager(shift.user_id)?;
    Ok(shift)
}

/// Load the shift, compute its next state with `step`, and persist it.
async fn transition<F>(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
    action: &'static str,
    step: F,
) -> AppResult<Json<WorkShift>>
where
    F: FnOnce(&ShiftClock, Timestamp) -> Result<ShiftTransition, CoreError>,
{
    let current = find_owned(state, user, id).await?;
    let clock = current.clock()?;
    let now = Utc::now();
    let next = step(&clock, now)?;

    let updated = WorkShiftRepo::apply_transition(&state.pool, &current, &next)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Shift changed concurrently, reload and try again".into(),
            ))
        })?;

    tracing::info!(
        shift_id = id,
        user_id = updated.user_id,
        action,
        from = clock.status.as_str(),
        to = %updated.status,
        worked_minutes = updated.worked_minutes,
        "Shift transition"
    );
    Ok(Json(with_live_hours(updated, now)?))
}

/// POST /api/v1/shifts (clock in)
pub async fn clock_in(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<StartShift>,
) -> AppResult<(StatusCode, Json<WorkShift>)> {
    input.validate()?;
    let worker = user.acting_for(input.user_id)?;

    let target = UserRepo::find_by_id(&state.pool, worker)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: worker,
        }))?;
    if !target.is_active {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot clock in a deactivated user".into(),
        )));
    }
    if let Some(project_id) = input.project_id {
        ProjectRepo::find_by_id(&state.pool, project_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }))?;
    }
    if let Some(open) = WorkShiftRepo::find_open_for_user(&state.pool, worker).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "User already has an open shift (id {})",
            open.id
        ))));
    }

    // The partial unique index still rejects a racing second clock-in.
    let shift =
        WorkShiftRepo::start(&state.pool, worker, input.project_id, input.notes.as_deref()).await?;
    tracing::info!(shift_id = shift.id, user_id = worker, "Shift started");
    Ok((StatusCode::CREATED, Json(shift)))
}

/// GET /api/v1/shifts?user_id=&status=&from=&to=
///
/// Workers only ever see their own shifts.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(mut filter): Query<WorkShiftFilter>,
) -> AppResult<Json<Vec<WorkShift>>> {
    if let Some(status) = &filter.status {
        ShiftStatus::parse(status)?;
    }
    if !user.is_manager() {
        filter.user_id = Some(user.user_id);
    }
    let now = Utc::now();
    let shifts = WorkShiftRepo::list(&state.pool, &filter)
        .await?
        .into_iter()
        .map(|s| with_live_hours(s, now))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(shifts))
}

/// GET /api/v1/shifts/current
///
/// The caller's open shift, or `{"data": null}` when clocked out.
pub async fn current(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Option<WorkShift>>>> {
    let now = Utc::now();
    let shift = WorkShiftRepo::find_open_for_user(&state.pool, user.user_id)
        .await?
        .map(|s| with_live_hours(s, now))
        .transpose()?;
    Ok(response::data(shift))
}

/// GET /api/v1/shifts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorkShift>> {
    let shift = find_owned(&state, &user, id).await?;
    Ok(Json(with_live_hours(shift, Utc::now())?))
}

/// POST /api/v1/shifts/{id}/clock-out
pub async fn clock_out(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorkShift>> {
    transition(&state, &user, id, "clock_out", shift::clock_out).await
}

/// POST /api/v1/shifts/{id}/confirm-overtime
pub async fn confirm_overtime(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorkShift>> {
    transition(&state, &user, id, "confirm_overtime", shift::confirm_overtime).await
}

/// POST /api/v1/shifts/{id}/reject-overtime
pub async fn reject_overtime(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorkShift>> {
    transition(&state, &user, id, "reject_overtime", shift::reject_overtime).await
}

/// POST /api/v1/shifts/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorkShift>> {
    transition(&state, &user, id, "cancel", shift::cancel).await
}

/// POST /api/v1/shifts/{id}/rest
pub async fn add_rest(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AddRest>,
) -> AppResult<Json<WorkShift>> {
    input.validate()?;
    transition(&state, &user, id, "rest", |clock, now| {
        shift::add_rest(clock, input.minutes, now)
    })
    .await
}
