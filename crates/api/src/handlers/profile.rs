//! Handlers for public profiles.

use applifarm_core::accounts::ProfileUpdateRequest;
use applifarm_core::error::CoreError;
use applifarm_core::types::DbId;
use applifarm_db::models::profile::{Profile, PublicProfile, UpdateProfile};
use applifarm_db::repositories::ProfileRepo;
use axum::extract::State;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::PROFILE;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/profiles/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<PublicProfile>> {
    let profile = ProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: PROFILE,
            id,
        })?;
    Ok(Json(profile.into()))
}

/// PUT /api/profiles/me
///
/// Change the display name and/or avatar URL. An empty `avatar_url` removes
/// the avatar.
pub async fn update_my_profile(
    State(state): State<AppState>,
    auth: Result<AuthUser, AppError>,
    AppJson(input): AppJson<ProfileUpdateRequest>,
) -> AppResult<Json<Profile>> {
    let patch = input.validate().map_err(CoreError::Validation)?;
    let auth = auth?;

    let update = UpdateProfile {
        full_name: patch.full_name,
        avatar_url: patch.avatar_url,
    };
    let profile = ProfileRepo::update(&state.pool, auth.user_id, &update)
        .await?
        .ok_or(CoreError::NotFound {
            entity: PROFILE,
            id: auth.user_id,
        })?;

    tracing::info!(user_id = auth.user_id, "Profile updated");
    Ok(Json(profile))
}
