//! Role gates for handlers.
//!
//! The three roles form a ladder (`worker` < `supervisor` < `admin`); each
//! extractor authenticates first and then answers 403 below its rung.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use faena_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn gate(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(&AuthUser) -> bool,
    denial: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if allowed(&user) {
        Ok(user)
    } else {
        tracing::debug!(user_id = user.user_id, role = %user.role, "Role gate denied");
        Err(CoreError::Forbidden(denial.to_string()).into())
    }
}

/// Only admins: user management and destructive deletes.
///
/// ```ignore
/// async fn delete_project(RequireAdmin(admin): RequireAdmin, ..) -> AppResult<StatusCode>
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gate(parts, state, AuthUser::is_admin, "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// Supervisors and admins: master data, payroll, exports.
pub struct RequireManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gate(
            parts,
            state,
            AuthUser::is_manager,
            "Supervisor or Admin role required",
        )
        .await
        .map(RequireManager)
    }
}

/// Any signed-in user.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gate(parts, state, |_| true, "").await.map(RequireAuth)
    }
}
