//! Refresh sessions.

use applifarm_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One refresh token's lifetime. Rotation revokes the row and starts a
/// successor, so a user has one live row per signed-in device.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    /// `User-Agent` of the client that started the session.
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A refresh token about to be handed out. `user_id` is filled in by the
/// repository when rotating.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
}
