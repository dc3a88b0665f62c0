//! Project entity model and DTOs.

use applifarm_core::projects::{NewProject, ProjectPatch};
use applifarm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::profile::AuthorSummary;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    /// Denormalized count of rows in `likes` for this project.
    pub likes_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project joined with its author's public profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    #[sqlx(flatten)]
    #[serde(rename = "profiles")]
    pub author: AuthorSummary,
}

/// DTO for inserting a project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

impl CreateProject {
    pub fn new(user_id: DbId, input: NewProject) -> Self {
        Self {
            user_id,
            title: input.title,
            description: input.description,
            url: input.url,
            image_url: input.image_url,
            categories: input.categories,
            tags: input.tags,
        }
    }
}

/// Partial update. `None` fields are left untouched; `image_url: Some(None)`
/// clears the image.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<Option<String>>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl From<ProjectPatch> for UpdateProject {
    fn from(p: ProjectPatch) -> Self {
        Self {
            title: p.title,
            description: p.description,
            url: p.url,
            image_url: p.image_url,
            categories: p.categories,
            tags: p.tags,
        }
    }
}

/// Filters for the project listing.
#[derive(Debug, Clone, Default)]
pub struct ProjectListFilter {
    /// Only projects filed under this category.
    pub category: Option<String>,
    /// Case-insensitive substring match on title or description.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
