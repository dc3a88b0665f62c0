//! Route definitions for the `/profiles` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// ```text
/// PUT /me    -> update_my_profile (requires auth)
/// GET /{id}  -> get_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", put(profile::update_my_profile))
        .route("/{id}", get(profile::get_profile))
}
