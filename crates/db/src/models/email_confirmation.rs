//! Email confirmation token model.

use applifarm_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from `email_confirmations`. Tokens are single-use.
#[derive(Debug, Clone, FromRow)]
pub struct EmailConfirmation {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
