//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Input DTOs for inserts and partial updates

pub mod comment;
pub mod email_confirmation;
pub mod like;
pub mod profile;
pub mod project;
pub mod project_update;
pub mod session;
pub mod user;
