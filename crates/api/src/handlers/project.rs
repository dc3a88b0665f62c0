//! Handlers for the `/projects` resource.
//!
//! Listing and detail pages are public. Creating requires a signed-in user;
//! editing and deleting are limited to the project's owner.

use applifarm_core::error::CoreError;
use applifarm_core::projects::{clamp_limit, clamp_offset, ProjectFields, CATEGORIES, RECENT_LIMIT};
use applifarm_core::share::{project_page_url, share_links, ShareLinks};
use applifarm_core::types::DbId;
use applifarm_db::models::profile::UpsertProfile;
use applifarm_db::models::project::{
    CreateProject, Project, ProjectListFilter, ProjectWithAuthor, UpdateProject,
};
use applifarm_db::repositories::{LikeRepo, ProfileRepo, ProjectRepo, UserRepo};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::{NOT_ALLOWED_TO_DELETE, PROJECT};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::ProjectListParams;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

const NOT_ALLOWED_TO_EDIT: &str = "編集する権限がありません";

/// Response for `GET /projects`.
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub data: Vec<ProjectWithAuthor>,
    /// Number of projects matching the filter, ignoring paging.
    pub total: i64,
    /// Categories offered as filters.
    pub categories: &'static [&'static str],
}

/// Project detail page payload.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectWithAuthor,
    pub liked_by_me: bool,
    pub is_owner: bool,
    pub share: ShareLinks,
}

// ---------------------------------------------------------------------------
// GET /projects
// ---------------------------------------------------------------------------

/// List projects, newest first, optionally filtered by category and a
/// title/description search.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<ProjectListResponse>> {
    let filter = ProjectListFilter {
        category: non_blank(params.category),
        search: non_blank(params.search),
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    };

    let data = ProjectRepo::list(&state.pool, &filter).await?;
    let total = ProjectRepo::count(&state.pool, &filter).await?;

    Ok(Json(ProjectListResponse {
        data,
        total,
        categories: CATEGORIES,
    }))
}

/// GET /api/projects/recent
pub async fn recent_projects(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProjectWithAuthor>>>> {
    let projects = ProjectRepo::recent(&state.pool, RECENT_LIMIT).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/projects/categories
///
/// Categories that at least one project uses.
pub async fn used_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let categories = ProjectRepo::distinct_categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

// ---------------------------------------------------------------------------
// POST /projects
// ---------------------------------------------------------------------------

/// Publish a project. The owner's profile row is created first if missing.
pub async fn create_project(
    State(state): State<AppState>,
    auth: Result<AuthUser, AppError>,
    AppJson(input): AppJson<ProjectFields>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let new_project = input.into_new_project().map_err(CoreError::Validation)?;
    let auth = auth?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(CoreError::unauthenticated)?;
    ProfileRepo::upsert(
        &state.pool,
        &UpsertProfile {
            id: user.id,
            email: user.email,
            full_name: None,
            avatar_url: None,
        },
    )
    .await?;

    let project =
        ProjectRepo::create(&state.pool, &CreateProject::new(auth.user_id, new_project)).await?;

    tracing::info!(project_id = project.id, user_id = auth.user_id, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

// ---------------------------------------------------------------------------
// GET /projects/{id}
// ---------------------------------------------------------------------------

/// Project detail with author, the viewer's like state, and share links.
pub async fn get_project(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = ProjectRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: PROJECT,
            id,
        })?;

    let (liked_by_me, is_owner) = match viewer.user_id() {
        Some(user_id) => (
            LikeRepo::is_liked(&state.pool, user_id, id).await?,
            project.project.user_id == user_id,
        ),
        None => (false, false),
    };

    let page_url = project_page_url(&state.config.site_url, id);
    let share = share_links(&page_url, &project.project.title);

    Ok(Json(ProjectDetail {
        project,
        liked_by_me,
        is_owner,
        share,
    }))
}

// ---------------------------------------------------------------------------
// PUT /projects/{id}
// ---------------------------------------------------------------------------

/// Edit a project. Only fields present in the body change; an empty
/// `image_url` removes the image.
pub async fn update_project(
    State(state): State<AppState>,
    auth: Result<AuthUser, AppError>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ProjectFields>,
) -> AppResult<Json<Project>> {
    let patch = input.into_patch().map_err(CoreError::Validation)?;
    let auth = auth?;

    require_owner(&state, id, auth.user_id, NOT_ALLOWED_TO_EDIT).await?;

    let project = ProjectRepo::update(&state.pool, id, auth.user_id, &UpdateProject::from(patch))
        .await?
        .ok_or(CoreError::NotFound {
            entity: PROJECT,
            id,
        })?;

    tracing::info!(project_id = id, user_id = auth.user_id, "Project updated");
    Ok(Json(project))
}

// ---------------------------------------------------------------------------
// DELETE /projects/{id}
// ---------------------------------------------------------------------------

/// Delete a project together with its likes, comments and update log.
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    require_owner(&state, id, auth.user_id, NOT_ALLOWED_TO_DELETE).await?;

    if !ProjectRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(CoreError::NotFound {
            entity: PROJECT,
            id,
        }
        .into());
    }

    tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");
    Ok(Json(SuccessResponse::ok()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 404 if the project is missing, 403 with `denied` if `user_id` does not own it.
async fn require_owner(
    state: &AppState,
    id: DbId,
    user_id: DbId,
    denied: &str,
) -> AppResult<()> {
    let owner = ProjectRepo::owner_of(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: PROJECT,
            id,
        })?;
    if owner != user_id {
        return Err(CoreError::Forbidden(denied.to_string()).into());
    }
    Ok(())
}

/// Trimmed filter value with NUL removed; blank means no filter.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.replace('\0', "").trim().to_string())
        .filter(|v| !v.is_empty())
}
