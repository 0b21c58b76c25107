//! Repository for the `user_sessions` table.
//!
//! A refresh token is single use: [`SessionRepo::consume`] revokes it in the
//! same statement that reads it, so two concurrent refreshes with the same
//! token cannot both succeed.

use faena_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{NewSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, revoked_at, \
                        user_agent, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Store a newly issued refresh token.
    pub async fn open(pool: &PgPool, session: &NewSession<'_>) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, user_agent)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(session.user_id)
            .bind(session.refresh_token_hash)
            .bind(session.expires_at)
            .bind(session.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Revoke and return the live session holding `hash`.
    ///
    /// `None` when the token is unknown, expired, or was already used.
    pub async fn consume(pool: &PgPool, hash: &str) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET revoked_at = NOW()
             WHERE refresh_token_hash = $1
               AND revoked_at IS NULL
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke every live session of a user (logout, deactivation, password
    /// reset). Returns how many were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET revoked_at = NOW()
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
