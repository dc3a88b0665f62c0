use crate::auth_errors::AuthFailure;
use crate::types::DbId;

/// Domain-level error shared by all crates.
///
/// Messages carried by the string variants are user-facing (Japanese) and are
/// passed through to the HTTP response unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `entity` is the user-facing noun, e.g. `"コメント"`.
    #[error("{entity}が見つかりません (id {id})")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Authentication flow failure, rendered through the auth error table.
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Missing or invalid credentials on a route that requires a user.
    pub fn unauthenticated() -> Self {
        CoreError::Unauthorized("ユーザーが認証されていません".to_string())
    }
}

/// Message returned when a required body field is absent or blank.
pub const MISSING_FIELDS: &str = "必須フィールドが不足しています";

/// Message returned when a delete request carries no `id` parameter.
pub const MISSING_ID: &str = "IDが必要です";
