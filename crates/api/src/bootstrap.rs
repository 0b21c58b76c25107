//! First-run setup.

use faena_core::roles::ROLE_ADMIN;
use faena_db::models::user::{CreateUser, User};
use faena_db::repositories::{RoleRepo, UserRepo};
use faena_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::handlers::user::MIN_PASSWORD_LENGTH;

/// Create the first admin account when the `users` table is empty.
///
/// Returns `None` (and changes nothing) once any user exists.
pub async fn ensure_admin(pool: &DbPool, email: &str, password: &str) -> AppResult<Option<User>> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(None);
    }
    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(AppError::BadRequest)?;

    let role = RoleRepo::find_by_name(pool, ROLE_ADMIN)
        .await?
        .ok_or_else(|| AppError::InternalError("Seeded admin role is missing".into()))?;
    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: "Administrator".into(),
            email: email.trim().to_string(),
            password_hash,
            role_id: role.id,
            national_id: None,
            phone: None,
            hourly_rate: None,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin created");
    Ok(Some(user))
}
