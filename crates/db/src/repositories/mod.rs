//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod email_confirmation_repo;
pub mod like_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod project_update_repo;
pub mod session_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use email_confirmation_repo::EmailConfirmationRepo;
pub use like_repo::LikeRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use project_update_repo::ProjectUpdateRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
