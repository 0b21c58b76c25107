//! Refresh-token sessions, one per login on a device.

use faena_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    /// SHA-256 of the opaque refresh token; the plaintext is never stored.
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values for a freshly issued refresh token.
pub struct NewSession<'a> {
    pub user_id: DbId,
    pub refresh_token_hash: &'a str,
    pub expires_at: Timestamp,
    pub user_agent: Option<&'a str>,
}
