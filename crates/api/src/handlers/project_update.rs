//! Handlers for a project's update log ("改善履歴").
//!
//! Only the project owner can add or remove entries.

use applifarm_core::error::{CoreError, MISSING_FIELDS, MISSING_ID};
use applifarm_core::project_updates::{validate_update_content, NOT_OWNER_ON_CREATE};
use applifarm_core::types::DbId;
use applifarm_db::models::project_update::{CreateProjectUpdate, ProjectUpdate};
use applifarm_db::repositories::{ProjectRepo, ProjectUpdateRepo};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, IdInput};
use crate::handlers::{NOT_ALLOWED_TO_DELETE, PROJECT, PROJECT_UPDATE};
use crate::middleware::auth::AuthUser;
use crate::query::{parse_id, IdParams};
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// Request body for `POST /project-updates`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectUpdateRequest {
    pub project_id: Option<IdInput>,
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /projects/{id}/updates
// ---------------------------------------------------------------------------

/// The update log of a project, newest first.
pub async fn list_by_project(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectUpdate>>>> {
    project_owner(&state, project_id).await?;
    let updates = ProjectUpdateRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: updates }))
}

// ---------------------------------------------------------------------------
// POST /project-updates
// ---------------------------------------------------------------------------

/// Append an entry to a project's update log.
pub async fn create_project_update(
    State(state): State<AppState>,
    auth: Result<AuthUser, AppError>,
    AppJson(input): AppJson<CreateProjectUpdateRequest>,
) -> AppResult<(StatusCode, Json<ProjectUpdate>)> {
    let project_id = input.project_id.filter(IdInput::is_present);
    let (Some(project_id), Some(content)) = (project_id, input.content) else {
        return Err(CoreError::Validation(MISSING_FIELDS.into()).into());
    };
    let content = validate_update_content(&content).map_err(CoreError::Validation)?;

    let auth = auth?;

    let project_id = project_id.resolve().ok_or(CoreError::NotFound {
        entity: PROJECT,
        id: 0,
    })?;
    if project_owner(&state, project_id).await? != auth.user_id {
        return Err(CoreError::Forbidden(NOT_OWNER_ON_CREATE.into()).into());
    }

    let update = ProjectUpdateRepo::create(
        &state.pool,
        &CreateProjectUpdate {
            project_id,
            content,
        },
    )
    .await?;

    tracing::info!(
        update_id = update.id,
        project_id,
        user_id = auth.user_id,
        "Project update added"
    );

    Ok((StatusCode::CREATED, Json(update)))
}

// ---------------------------------------------------------------------------
// DELETE /project-updates?id=
// ---------------------------------------------------------------------------

/// Remove an update log entry. Only the owner of its project may do this.
pub async fn delete_project_update(
    State(state): State<AppState>,
    auth: Result<AuthUser, AppError>,
    Query(params): Query<IdParams>,
) -> AppResult<Json<SuccessResponse>> {
    let raw_id = params
        .raw()
        .ok_or_else(|| CoreError::Validation(MISSING_ID.into()))?;
    let auth = auth?;

    let id = parse_id(raw_id).ok_or(CoreError::NotFound {
        entity: PROJECT_UPDATE,
        id: 0,
    })?;
    let update = ProjectUpdateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: PROJECT_UPDATE,
            id,
        })?;

    let owner = ProjectRepo::owner_of(&state.pool, update.project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: PROJECT_UPDATE,
            id,
        })?;
    if owner != auth.user_id {
        return Err(CoreError::Forbidden(NOT_ALLOWED_TO_DELETE.into()).into());
    }

    ProjectUpdateRepo::delete(&state.pool, id).await?;
    tracing::info!(update_id = id, user_id = auth.user_id, "Project update deleted");

    Ok(Json(SuccessResponse::ok()))
}

/// Owner of `project_id`, or 404.
async fn project_owner(state: &AppState, project_id: DbId) -> AppResult<DbId> {
    ProjectRepo::owner_of(&state.pool, project_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: PROJECT,
                id: project_id,
            }
            .into()
        })
}
