//! Comment model and DTOs.

use applifarm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::profile::AuthorSummary;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment with its author's display name and avatar under `profiles`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub comment: Comment,
    #[sqlx(flatten)]
    #[serde(rename = "profiles")]
    pub author: AuthorSummary,
}

#[derive(Debug, Clone)]
pub struct CreateComment {
    pub project_id: DbId,
    pub user_id: DbId,
    /// Already trimmed and length-checked.
    pub content: String,
}
