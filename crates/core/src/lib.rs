//! Domain rules for Appli Farm.
//!
//! Everything here is pure: validation, lookup tables, and formatting used by
//! the HTTP handlers. No database or network access.

pub mod accounts;
pub mod auth_errors;
pub mod comments;
pub mod contact;
pub mod error;
pub mod project_updates;
pub mod projects;
pub mod share;
pub mod text;
pub mod types;
