//! Handlers for the `/users` resource.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use faena_core::error::CoreError;
use faena_core::roles::DEFAULT_ROLE_ID;
use faena_core::types::DbId;
use faena_core::validation::validate_non_negative;
use faena_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use faena_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::UserListParams;
use crate::state::AppState;

/// Minimum password length on creation and reset.
pub const MIN_PASSWORD_LENGTH: usize = 12;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    /// Defaults to the `worker` role.
    pub role_id: Option<DbId>,
    #[validate(length(max = 20))]
    pub national_id: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    pub hourly_rate: Option<Decimal>,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    #[validate(length(max = 20))]
    pub national_id: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if let Some(rate) = input.hourly_rate {
        validate_non_negative("hourly_rate", rate)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    let role_id = input.role_id.unwrap_or(DEFAULT_ROLE_ID);
    ensure_role_exists(&state, role_id).await?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email.trim().to_string(),
            password_hash: hashed,
            role_id,
            national_id: input.national_id,
            phone: input.phone,
            hourly_rate: input.hourly_rate,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, "User created");
    let response = user_to_response(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/users
///
/// Active users only unless `?include_inactive=true`.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(
        &state.pool,
        !params.include_inactive,
        params.limit,
        params.offset,
    )
    .await?;

    // One roles query instead of one per user.
    let roles = RoleRepo::list(&state.pool).await?;

    let responses = users
        .iter()
        .map(|u| {
            let role = roles
                .iter()
                .find(|r| r.id == u.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            UserResponse::from_user(u, role)
        })
        .collect();

    Ok(Json(responses))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user_to_response(&state, &user).await?))
}

/// PUT /api/v1/users/{id}
///
/// Profile fields only; passwords go through reset-password.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    if let Some(rate) = input.hourly_rate {
        validate_non_negative("hourly_rate", rate)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(role_id) = input.role_id {
        ensure_role_exists(&state, role_id).await?;
    }

    let update = UpdateUser {
        name: input.name,
        email: input.email.map(|e| e.trim().to_string()),
        role_id: input.role_id,
        national_id: input.national_id,
        phone: input.phone,
        hourly_rate: input.hourly_rate,
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user_to_response(&state, &user).await?))
}

/// DELETE /api/v1/users/{id}
///
/// Deactivates the account and revokes its sessions. Shifts, reports and
/// payroll rows keep referencing the user.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "You cannot deactivate your own account".into(),
        )));
    }
    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    tracing::info!(user_id = id, deactivated_by = admin.user_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !UserRepo::update_password(&state.pool, id, &hashed).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn user_to_response(state: &AppState, user: &User) -> AppResult<UserResponse> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(UserResponse::from_user(user, role))
}

async fn ensure_role_exists(state: &AppState, role_id: DbId) -> AppResult<()> {
    RoleRepo::find_by_id(&state.pool, role_id)
        .await?
        .ok_or(AppError::Core(CoreError::Validation(format!(
            "Unknown role id {role_id}"
        ))))?;
    Ok(())
}
