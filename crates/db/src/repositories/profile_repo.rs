//! Repository for the `profiles` table.

use applifarm_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, UpdateProfile, UpsertProfile};

const COLUMNS: &str = "id, email, full_name, avatar_url, created_at, updated_at";

/// Author columns joined from `profiles pr`, aliased for
/// [`AuthorSummary`](crate::models::profile::AuthorSummary).
pub(crate) const AUTHOR_COLUMNS: &str =
    "pr.full_name AS author_full_name, pr.avatar_url AS author_avatar_url";

/// Existing display name and avatar win over NULLs in the new row.
const UPSERT: &str = "INSERT INTO profiles (id, email, full_name, avatar_url)
     VALUES ($1, $2, $3, $4)
     ON CONFLICT (id) DO UPDATE SET
        email = EXCLUDED.email,
        full_name = COALESCE(EXCLUDED.full_name, profiles.full_name),
        avatar_url = COALESCE(EXCLUDED.avatar_url, profiles.avatar_url)
     RETURNING id, email, full_name, avatar_url, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Create the profile if missing, otherwise refresh its email.
    pub async fn upsert(pool: &PgPool, input: &UpsertProfile) -> Result<Profile, sqlx::Error> {
        sqlx::query_as::<_, Profile>(UPSERT)
            .bind(input.id)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.avatar_url)
            .fetch_one(pool)
            .await
    }

    /// [`Self::upsert`] inside an existing transaction.
    pub async fn upsert_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &UpsertProfile,
    ) -> Result<Profile, sqlx::Error> {
        sqlx::query_as::<_, Profile>(UPSERT)
            .bind(input.id)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.avatar_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                avatar_url = CASE WHEN $3 THEN $4 ELSE avatar_url END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(input.avatar_url.is_some())
            .bind(input.avatar_url.clone().flatten())
            .fetch_optional(pool)
            .await
    }
}
