//! Public profile model and DTOs.

use applifarm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table. `id` equals the owning user's id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public view of a profile (no email), used on profile pages.
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfile {
    pub id: DbId,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
}

impl From<Profile> for PublicProfile {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name,
            avatar_url: p.avatar_url,
            created_at: p.created_at,
        }
    }
}

/// Author details embedded in projects and comments.
///
/// Selected with `author_`-prefixed column aliases and serialized under the
/// `profiles` key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuthorSummary {
    #[sqlx(rename = "author_full_name")]
    pub full_name: Option<String>,
    #[sqlx(rename = "author_avatar_url")]
    pub avatar_url: Option<String>,
}

/// DTO for inserting or refreshing a profile.
#[derive(Debug, Clone)]
pub struct UpsertProfile {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Partial profile update. `avatar_url: Some(None)` clears the avatar.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub avatar_url: Option<Option<String>>,
}
