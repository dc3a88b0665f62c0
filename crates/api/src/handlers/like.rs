//! Handlers for liking projects.

use applifarm_core::error::CoreError;
use applifarm_core::types::DbId;
use applifarm_db::models::like::LikeState;
use applifarm_db::repositories::LikeRepo;
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::handlers::PROJECT;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/projects/{id}/like
///
/// Liking an already liked project leaves the count unchanged.
pub async fn like_project(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<LikeState>> {
    let like = LikeRepo::like(&state.pool, auth.user_id, project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: PROJECT,
            id: project_id,
        })?;
    tracing::debug!(project_id, user_id = auth.user_id, likes = like.likes_count, "Project liked");
    Ok(Json(like))
}

/// DELETE /api/projects/{id}/like
pub async fn unlike_project(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<LikeState>> {
    let like = LikeRepo::unlike(&state.pool, auth.user_id, project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: PROJECT,
            id: project_id,
        })?;
    tracing::debug!(project_id, user_id = auth.user_id, likes = like.likes_count, "Project unliked");
    Ok(Json(like))
}
