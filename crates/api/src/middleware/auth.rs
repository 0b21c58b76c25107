//! Bearer-token extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use faena_core::error::CoreError;
use faena_core::roles::{can_manage, ROLE_ADMIN};
use faena_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity taken from the `Authorization: Bearer <jwt>` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// Role name (`admin`, `supervisor`, `worker`).
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Admins and supervisors manage master data and other people's records.
    pub fn is_manager(&self) -> bool {
        can_manage(&self.role)
    }

    /// Allow the call when it targets the caller's own records or the caller
    /// is a manager.
    pub fn ensure_self_or_manager(&self, owner_id: DbId) -> Result<(), AppError> {
        if owner_id == self.user_id || self.is_manager() {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "You may only act on your own records".into(),
            )))
        }
    }

    /// Resolve an optional `user_id` from a request body: the caller by
    /// default, someone else only for managers.
    pub fn acting_for(&self, requested: Option<DbId>) -> Result<DbId, AppError> {
        let target = requested.unwrap_or(self.user_id);
        self.ensure_self_or_manager(target)?;
        Ok(target)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, state.jwt()).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn user(id: DbId, role: &str) -> AuthUser {
        AuthUser {
            user_id: id,
            role: role.to_string(),
        }
    }

    #[test]
    fn worker_acts_only_for_self() {
        let worker = user(5, "worker");
        assert_eq!(worker.acting_for(None).unwrap(), 5);
        assert_eq!(worker.acting_for(Some(5)).unwrap(), 5);
        assert_matches!(
            worker.acting_for(Some(6)),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }

    #[test]
    fn supervisor_acts_for_anyone() {
        let supervisor = user(2, "supervisor");
        assert_eq!(supervisor.acting_for(Some(40)).unwrap(), 40);
        assert!(!supervisor.is_admin());
        assert!(supervisor.is_manager());
    }
}
