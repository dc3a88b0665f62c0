//! Repository for the `email_confirmations` table.

use applifarm_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::email_confirmation::EmailConfirmation;

const COLUMNS: &str = "id, user_id, token_hash, expires_at, used_at, created_at";

pub struct EmailConfirmationRepo;

impl EmailConfirmationRepo {
    /// Store a new confirmation token hash for `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<EmailConfirmation, sqlx::Error> {
        let query = format!(
            "INSERT INTO email_confirmations (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmailConfirmation>(&query)
            .bind(user_id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Use up a token and confirm its user's email.
    ///
    /// Returns the user id, or `None` when the token is unknown, expired, or
    /// already used. Both writes happen in one transaction.
    pub async fn consume(pool: &PgPool, token_hash: &str) -> Result<Option<DbId>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, DbId>(
            "UPDATE email_confirmations SET used_at = NOW()
             WHERE token_hash = $1 AND used_at IS NULL AND expires_at > NOW()
             RETURNING user_id",
        )
        .bind(token_hash)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = user_id else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE users SET email_confirmed_at = COALESCE(email_confirmed_at, NOW())
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(user_id))
    }
}
