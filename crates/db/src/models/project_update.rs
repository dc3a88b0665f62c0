//! Project update log model and DTOs.

use applifarm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `project_updates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectUpdate {
    pub id: DbId,
    pub project_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateProjectUpdate {
    pub project_id: DbId,
    /// Already trimmed and length-checked.
    pub content: String,
}
