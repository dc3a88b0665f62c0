//! Handlers for project comments.
//!
//! Anyone can read comments; posting requires a signed-in user and only the
//! author may delete.

use applifarm_core::comments::validate_comment_content;
use applifarm_core::error::{CoreError, MISSING_FIELDS, MISSING_ID};
use applifarm_core::types::DbId;
use applifarm_db::models::comment::{CommentWithAuthor, CreateComment};
use applifarm_db::repositories::{CommentRepo, ProjectRepo};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, IdInput};
use crate::handlers::{COMMENT, NOT_ALLOWED_TO_DELETE, PROJECT};
use crate::middleware::auth::AuthUser;
use crate::query::{parse_id, IdParams};
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// Request body for `POST /comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub project_id: Option<IdInput>,
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /projects/{id}/comments
// ---------------------------------------------------------------------------

/// Comments on a project with their authors, oldest first.
pub async fn list_by_project(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentWithAuthor>>>> {
    ensure_project_exists(&state, project_id).await?;
    let comments = CommentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

// ---------------------------------------------------------------------------
// POST /comments
// ---------------------------------------------------------------------------

/// Post a comment on a project. Returns the comment with its author profile.
pub async fn create_comment(
    State(state): State<AppState>,
    auth: Result<AuthUser, AppError>,
    AppJson(input): AppJson<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentWithAuthor>)> {
    let project_id = input.project_id.filter(IdInput::is_present);
    let (Some(project_id), Some(content)) = (project_id, input.content) else {
        return Err(CoreError::Validation(MISSING_FIELDS.into()).into());
    };
    let content = validate_comment_content(&content).map_err(CoreError::Validation)?;

    let auth = auth?;

    let project_id = project_id.resolve().ok_or(CoreError::NotFound {
        entity: PROJECT,
        id: 0,
    })?;
    ensure_project_exists(&state, project_id).await?;

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            project_id,
            user_id: auth.user_id,
            content,
        },
    )
    .await?;

    tracing::info!(
        comment_id = comment.comment.id,
        project_id,
        user_id = auth.user_id,
        "Comment posted"
    );

    Ok((StatusCode::CREATED, Json(comment)))
}

// ---------------------------------------------------------------------------
// DELETE /comments?id=
// ---------------------------------------------------------------------------

/// Delete a comment. Only its author may do this.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: Result<AuthUser, AppError>,
    Query(params): Query<IdParams>,
) -> AppResult<Json<SuccessResponse>> {
    let raw_id = params
        .raw()
        .ok_or_else(|| CoreError::Validation(MISSING_ID.into()))?;
    let auth = auth?;

    let id = parse_id(raw_id).ok_or(CoreError::NotFound {
        entity: COMMENT,
        id: 0,
    })?;
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: COMMENT, id })?;

    if comment.user_id != auth.user_id {
        return Err(CoreError::Forbidden(NOT_ALLOWED_TO_DELETE.into()).into());
    }

    CommentRepo::delete(&state.pool, id).await?;
    tracing::info!(comment_id = id, user_id = auth.user_id, "Comment deleted");

    Ok(Json(SuccessResponse::ok()))
}

async fn ensure_project_exists(state: &AppState, project_id: DbId) -> AppResult<()> {
    match ProjectRepo::owner_of(&state.pool, project_id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::NotFound {
            entity: PROJECT,
            id: project_id,
        }
        .into()),
    }
}
