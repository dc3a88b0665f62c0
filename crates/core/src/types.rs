//! Primitive aliases shared by every crate in the workspace.

/// Primary key of every table (PostgreSQL `BIGSERIAL`). A user's id is also
/// the id of their profile row.
pub type DbId = i64;

/// UTC timestamp as stored in `TIMESTAMPTZ` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
