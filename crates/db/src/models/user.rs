//! User account model and DTOs.

use applifarm_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Public data lives on [`super::profile::Profile`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub email_confirmed_at: Option<Timestamp>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

/// Everything written by a signup: the user row, its profile, and the first
/// email confirmation token.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub confirmation_token_hash: String,
    pub confirmation_expires_at: Timestamp,
}

/// DTO for inserting a user directly (seeding, tests).
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    /// Mark the email as already confirmed.
    pub confirmed: bool,
}
