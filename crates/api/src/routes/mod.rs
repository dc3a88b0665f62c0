pub mod auth;
pub mod comment;
pub mod contact;
pub mod health;
pub mod profile;
pub mod project;
pub mod project_update;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                       signup (public)
/// /auth/confirm                      confirm email, starts a session (public)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current profile (requires auth)
///
/// /profiles/me                       update own profile (PUT)
/// /profiles/{id}                     public profile
///
/// /projects                          list, create
/// /projects/recent                   newest projects for the home page
/// /projects/categories               categories in use
/// /projects/{id}                     get, update, delete
/// /projects/{id}/like                like (POST), unlike (DELETE)
/// /projects/{id}/comments            comments, oldest first
/// /projects/{id}/updates             update log, newest first
///
/// /comments                          create (POST), delete (DELETE ?id=)
/// /project-updates                   create (POST), delete (DELETE ?id=)
///
/// /contact                           contact form (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profiles", profile::router())
        .nest("/projects", project::router())
        .nest("/comments", comment::router())
        .nest("/project-updates", project_update::router())
        .nest("/contact", contact::router())
}
