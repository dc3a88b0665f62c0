//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Optional variant for public pages that
//!   personalize when signed in.

pub mod auth;
