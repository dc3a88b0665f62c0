//! Route definitions for the `/projects` resource, including the likes,
//! comments and update log nested under a project.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comment, like, project, project_update};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                -> list_projects
/// POST   /                -> create_project (requires auth)
/// GET    /recent          -> recent_projects
/// GET    /categories      -> used_categories
/// GET    /{id}            -> get_project
/// PUT    /{id}            -> update_project (owner)
/// DELETE /{id}            -> delete_project (owner)
/// POST   /{id}/like       -> like_project (requires auth)
/// DELETE /{id}/like       -> unlike_project (requires auth)
/// GET    /{id}/comments   -> comment::list_by_project
/// GET    /{id}/updates    -> project_update::list_by_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(project::list_projects).post(project::create_project),
        )
        .route("/recent", get(project::recent_projects))
        .route("/categories", get(project::used_categories))
        .route(
            "/{id}",
            get(project::get_project)
                .put(project::update_project)
                .delete(project::delete_project),
        )
        .route(
            "/{id}/like",
            post(like::like_project).delete(like::unlike_project),
        )
        .route("/{id}/comments", get(comment::list_by_project))
        .route("/{id}/updates", get(project_update::list_by_project))
}
