//! Repository for the `likes` table and the denormalized `projects.likes_count`.
//!
//! The join row and the counter always change in the same transaction, with
//! the project row locked, so `likes_count` equals the number of like rows.

use applifarm_core::types::DbId;
use sqlx::PgPool;

use crate::models::like::LikeState;

pub struct LikeRepo;

impl LikeRepo {
    /// Like a project. Liking twice is a no-op.
    ///
    /// Returns `None` if the project does not exist.
    pub async fn like(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<Option<LikeState>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = lock_project(&mut tx, project_id).await? else {
            return Ok(None);
        };

        let inserted = sqlx::query(
            "INSERT INTO likes (user_id, project_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_likes_user_project DO NOTHING",
        )
        .bind(user_id)
        .bind(project_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let likes_count = if inserted > 0 {
            sqlx::query_scalar::<_, i32>(
                "UPDATE projects SET likes_count = likes_count + 1
                 WHERE id = $1
                 RETURNING likes_count",
            )
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            current
        };

        tx.commit().await?;
        Ok(Some(LikeState {
            liked: true,
            likes_count,
        }))
    }

    /// Remove a like. Unliking a project that was not liked is a no-op.
    ///
    /// Returns `None` if the project does not exist.
    pub async fn unlike(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<Option<LikeState>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = lock_project(&mut tx, project_id).await? else {
            return Ok(None);
        };

        let deleted = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND project_id = $2")
            .bind(user_id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let likes_count = if deleted > 0 {
            sqlx::query_scalar::<_, i32>(
                "UPDATE projects SET likes_count = GREATEST(likes_count - 1, 0)
                 WHERE id = $1
                 RETURNING likes_count",
            )
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            current
        };

        tx.commit().await?;
        Ok(Some(LikeState {
            liked: false,
            likes_count,
        }))
    }

    /// Whether `user_id` currently likes `project_id`.
    pub async fn is_liked(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND project_id = $2)",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_one(pool)
        .await
    }
}

/// Lock the project row for the rest of the transaction and return its
/// current like count.
async fn lock_project(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    project_id: DbId,
) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT likes_count FROM projects WHERE id = $1 FOR UPDATE")
        .bind(project_id)
        .fetch_optional(&mut **tx)
        .await
}
