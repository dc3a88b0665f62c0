//! Repository for the `projects` table.

use applifarm_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{
    CreateProject, Project, ProjectListFilter, ProjectWithAuthor, UpdateProject,
};
use crate::repositories::profile_repo::AUTHOR_COLUMNS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, url, image_url, categories, tags, \
                       likes_count, created_at, updated_at";

/// [`COLUMNS`] qualified with the `p` alias used in author joins.
const P_COLUMNS: &str = "p.id, p.user_id, p.title, p.description, p.url, p.image_url, \
                         p.categories, p.tags, p.likes_count, p.created_at, p.updated_at";

/// Shared WHERE clause for listing: `$1` category, `$2` ILIKE pattern.
const LIST_FILTER: &str = "($1::text IS NULL OR p.categories @> ARRAY[$1::text])
               AND ($2::text IS NULL OR p.title ILIKE $2 OR p.description ILIKE $2)";

/// Provides CRUD and listing operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, title, description, url, image_url, categories, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.url)
            .bind(&input.image_url)
            .bind(&input.categories)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project together with its author's profile.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, {AUTHOR_COLUMNS}
             FROM projects p
             JOIN profiles pr ON pr.id = p.user_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProjectWithAuthor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The owner of a project, or `None` if it does not exist.
    pub async fn owner_of(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT user_id FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects newest first, filtered by category and a
    /// case-insensitive search over title and description.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectListFilter,
    ) -> Result<Vec<ProjectWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, {AUTHOR_COLUMNS}
             FROM projects p
             JOIN profiles pr ON pr.id = p.user_id
             WHERE {LIST_FILTER}
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ProjectWithAuthor>(&query)
            .bind(&filter.category)
            .bind(search_pattern(filter.search.as_deref()))
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of projects matching `filter`, ignoring pagination.
    pub async fn count(pool: &PgPool, filter: &ProjectListFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM projects p WHERE {LIST_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.category)
            .bind(search_pattern(filter.search.as_deref()))
            .fetch_one(pool)
            .await
    }

    /// The `limit` most recently created projects.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<ProjectWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, {AUTHOR_COLUMNS}
             FROM projects p
             JOIN profiles pr ON pr.id = p.user_id
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, ProjectWithAuthor>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every category used by at least one project, sorted.
    pub async fn distinct_categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT unnest(categories) AS category FROM projects ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a project owned by `user_id`. Only non-`None` fields in `input`
    /// are applied; `image_url: Some(None)` clears the image.
    ///
    /// Returns `None` if no such project exists for that owner.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                url = COALESCE($5, url),
                image_url = CASE WHEN $6 THEN $7 ELSE image_url END,
                categories = COALESCE($8, categories),
                tags = COALESCE($9, tags)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.url)
            .bind(input.image_url.is_some())
            .bind(input.image_url.clone().flatten())
            .bind(&input.categories)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project owned by `user_id`. Likes, comments and updates go
    /// with it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build an ILIKE pattern for a substring search, escaping wildcards.
fn search_pattern(search: Option<&str>) -> Option<String> {
    let term = search.map(str::trim).filter(|s| !s.is_empty())?;
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

#[cfg(test)]
mod tests {
    use super::search_pattern;

    #[test]
    fn blank_search_is_no_filter() {
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some("   ")), None);
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(search_pattern(Some(" todo ")).as_deref(), Some("%todo%"));
        assert_eq!(search_pattern(Some("100%_")).as_deref(), Some("%100\\%\\_%"));
    }
}
