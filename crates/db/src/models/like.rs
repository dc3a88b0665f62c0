//! Like state returned by the like/unlike operations.

use serde::Serialize;

/// Whether the caller likes a project, and the project's like count after
/// the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeState {
    pub liked: bool,
    pub likes_count: i32,
}
