pub mod auth;
pub mod comment;
pub mod contact;
pub mod like;
pub mod profile;
pub mod project;
pub mod project_update;

// User-facing entity names for `CoreError::NotFound`.
pub(crate) const PROJECT: &str = "プロジェクト";
pub(crate) const COMMENT: &str = "コメント";
pub(crate) const PROJECT_UPDATE: &str = "改善履歴";
pub(crate) const PROFILE: &str = "プロフィール";

/// Shown when someone other than the owner/author tries to delete.
pub(crate) const NOT_ALLOWED_TO_DELETE: &str = "削除する権限がありません";
