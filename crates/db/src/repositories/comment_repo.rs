//! Repository for the `comments` table.

use applifarm_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentWithAuthor, CreateComment};
use crate::repositories::profile_repo::AUTHOR_COLUMNS;

const COLUMNS: &str = "id, project_id, user_id, content, created_at, updated_at";

const C_COLUMNS: &str = "c.id, c.project_id, c.user_id, c.content, c.created_at, c.updated_at";

pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment and return it joined with its author's profile.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComment,
    ) -> Result<CommentWithAuthor, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                INSERT INTO comments (project_id, user_id, content)
                VALUES ($1, $2, $3)
                RETURNING {COLUMNS}
             )
             SELECT {C_COLUMNS}, {AUTHOR_COLUMNS}
             FROM c
             JOIN profiles pr ON pr.id = c.user_id"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Comments on a project, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {C_COLUMNS}, {AUTHOR_COLUMNS}
             FROM comments c
             JOIN profiles pr ON pr.id = c.user_id
             WHERE c.project_id = $1
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a comment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
