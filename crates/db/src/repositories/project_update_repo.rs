//! Repository for the `project_updates` table.

use applifarm_core::types::DbId;
use sqlx::PgPool;

use crate::models::project_update::{CreateProjectUpdate, ProjectUpdate};

const COLUMNS: &str = "id, project_id, content, created_at";

pub struct ProjectUpdateRepo;

impl ProjectUpdateRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateProjectUpdate,
    ) -> Result<ProjectUpdate, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_updates (project_id, content)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectUpdate>(&query)
            .bind(input.project_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectUpdate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_updates WHERE id = $1");
        sqlx::query_as::<_, ProjectUpdate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update log for a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectUpdate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_updates
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProjectUpdate>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_updates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
