//! Extractors whose rejections render as [`AppError`] JSON.

use applifarm_core::types::DbId;
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `axum::Json` with malformed bodies rejected as 400
/// `リクエストの形式が正しくありません`.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// `axum::extract::Path` with unparseable segments rejected as 404.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// An id supplied in a JSON body, either as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(DbId),
    Text(String),
}

impl IdInput {
    /// `0` and blank strings count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            IdInput::Number(n) => *n != 0,
            IdInput::Text(s) => !s.trim().is_empty(),
        }
    }

    /// The id, or `None` when it cannot name any row.
    pub fn resolve(&self) -> Option<DbId> {
        match self {
            IdInput::Number(n) => Some(*n),
            IdInput::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_input_accepts_numbers_and_numeric_strings() {
        let n: IdInput = serde_json::from_str("42").unwrap();
        let s: IdInput = serde_json::from_str("\" 42 \"").unwrap();
        assert_eq!(n.resolve(), Some(42));
        assert_eq!(s.resolve(), Some(42));
    }

    #[test]
    fn id_input_presence() {
        assert!(!IdInput::Number(0).is_present());
        assert!(!IdInput::Text("  ".into()).is_present());
        let junk = IdInput::Text("abc".into());
        assert!(junk.is_present());
        assert_eq!(junk.resolve(), None);
    }
}
