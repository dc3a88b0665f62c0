//! Repository for the `user_sessions` table.

use applifarm_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{NewSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                        user_agent, created_at, updated_at";

const INSERT: &str = "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, user_agent)
                      VALUES ($1, $2, $3, $4)";

pub struct SessionRepo;

impl SessionRepo {
    /// Start a session for `user_id` (login, email confirmation).
    pub async fn start(
        pool: &PgPool,
        user_id: DbId,
        session: &NewSession,
    ) -> Result<UserSession, sqlx::Error> {
        let query = format!("{INSERT} RETURNING {COLUMNS}");
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .bind(&session.refresh_token_hash)
            .bind(session.expires_at)
            .bind(&session.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Session behind a refresh token, if it is neither revoked nor expired.
    pub async fn find_live(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = $1
               AND NOT is_revoked
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(refresh_token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Trade a live refresh token for `next`.
    ///
    /// The old session is revoked and the new one inserted in one
    /// transaction. Returns `None` when the old token is unknown, expired,
    /// already rotated, or belongs to a deactivated account. Of two
    /// concurrent rotations of the same token, exactly one succeeds.
    pub async fn rotate(
        pool: &PgPool,
        refresh_token_hash: &str,
        next: &NewSession,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, DbId>(
            "UPDATE user_sessions s SET is_revoked = true
             FROM users u
             WHERE u.id = s.user_id
               AND u.is_active
               AND s.refresh_token_hash = $1
               AND NOT s.is_revoked
               AND s.expires_at > NOW()
             RETURNING s.user_id",
        )
        .bind(refresh_token_hash)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let query = format!("{INSERT} RETURNING {COLUMNS}");
        let session = sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .bind(&next.refresh_token_hash)
            .bind(next.expires_at)
            .bind(&next.user_agent)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(session))
    }

    /// Sign a user out everywhere. Returns how many sessions were live.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND NOT is_revoked",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
