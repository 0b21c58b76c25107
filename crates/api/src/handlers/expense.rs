//! Handlers for the `/expenses` resource.
//!
//! Any authenticated user records expenses; workers only see and edit their own.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::types::DbId;
use faena_core::validation::{validate_not_blank, validate_positive};
use faena_db::models::expense::{CreateExpense, Expense, ExpenseFilter, UpdateExpense};
use faena_db::repositories::{ExpenseRepo, ProjectRepo, UserRepo};
use validator::Validate;

use super::check;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads::{self, DOCUMENT_EXTENSIONS};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Expense",
        id,
    })
}

/// Load an expense the caller may touch.
async fn find_owned(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Expense> {
    let expense = ExpenseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    user.ensure_self_or_manager(expense.user_id)?;
    Ok(expense)
}

/// POST /api/v1/expenses
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateExpense>,
) -> AppResult<(StatusCode, Json<Expense>)> {
    input.validate()?;
    check(validate_not_blank("category", &input.category))?;
    check(validate_positive("amount", input.amount))?;
    let owner = user.acting_for(input.user_id)?;

    UserRepo::find_by_id(&state.pool, owner)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: owner,
        }))?;
    if let Some(project_id) = input.project_id {
        ProjectRepo::find_by_id(&state.pool, project_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }))?;
    }

    let expense = ExpenseRepo::create(&state.pool, owner, &input).await?;
    tracing::info!(expense_id = expense.id, user_id = owner, "Expense recorded");
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /api/v1/expenses?project_id=&user_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(mut filter): Query<ExpenseFilter>,
) -> AppResult<Json<Vec<Expense>>> {
    if !user.is_manager() {
        filter.user_id = Some(user.user_id);
    }
    Ok(Json(ExpenseRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/expenses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Expense>> {
    Ok(Json(find_owned(&state, &user, id).await?))
}

/// PUT /api/v1/expenses/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExpense>,
) -> AppResult<Json<Expense>> {
    input.validate()?;
    if let Some(amount) = input.amount {
        check(validate_positive("amount", amount))?;
    }
    find_owned(&state, &user, id).await?;

    let expense = ExpenseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(expense))
}

/// DELETE /api/v1/expenses/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state, &user, id).await?;
    if ExpenseRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/expenses/{id}/receipt (multipart, field `file`)
pub async fn upload_receipt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Expense>> {
    let current = find_owned(&state, &user, id).await?;
    let upload = uploads::read_file_field(multipart).await?;
    uploads::validate_extension(&upload.file_name, DOCUMENT_EXTENSIONS)?;

    let pool = &state.pool;
    let expense = uploads::replace(
        state.upload_dir(),
        "expenses",
        id,
        &upload,
        current.receipt_path.as_deref(),
        |path| async move { ExpenseRepo::set_receipt_path(pool, id, &path).await },
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    Ok(Json(expense))
}
