//! Route definitions for the `/project-updates` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::project_update;
use crate::state::AppState;

/// ```text
/// POST   /        -> create_project_update (owner)
/// DELETE /?id=    -> delete_project_update (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        post(project_update::create_project_update)
            .delete(project_update::delete_project_update),
    )
}
