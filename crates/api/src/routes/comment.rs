//! Route definitions for the `/comments` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// ```text
/// POST   /        -> create_comment (requires auth)
/// DELETE /?id=    -> delete_comment (author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        post(comment::create_comment).delete(comment::delete_comment),
    )
}
