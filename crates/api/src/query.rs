//! Shared query parameter types for API handlers.

use applifarm_core::types::DbId;
use serde::Deserialize;

/// `?id=` on the comment and update-log delete endpoints.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

impl IdParams {
    /// The raw id if one was supplied and is not blank.
    pub fn raw(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Parse an id that arrived as text. Non-numeric ids name no row.
pub fn parse_id(raw: &str) -> Option<DbId> {
    raw.trim().parse().ok()
}

/// Query parameters for `GET /projects`.
///
/// Values are clamped via `clamp_limit` / `clamp_offset` before reaching the
/// repository layer.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
