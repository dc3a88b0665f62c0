use applifarm_core::auth_errors::AuthFailure;
use applifarm_core::error::CoreError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Sanitized message for every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "リクエスト処理中にエラーが発生しました";

/// Message for request bodies that are not valid JSON for the endpoint.
pub const MALFORMED_BODY_MESSAGE: &str = "リクエストの形式が正しくありません";

/// Message when an outbound email could not be handed to the provider.
pub const DELIVERY_FAILED_MESSAGE: &str = "送信に失敗しました。もう一度お試しください。";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `applifarm_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a user-facing message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A resource addressed by a malformed id; rendered as 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Outbound mail failed; the detail is logged, not returned.
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    /// An internal error; the detail is logged, not returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        AppError::Core(CoreError::Auth(failure))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        AppError::BadRequest(MALFORMED_BODY_MESSAGE.to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected path parameter");
        AppError::NotFound("リソースが見つかりません".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity}が見つかりません"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error()
                }
                CoreError::Auth(failure) => return auth_failure_response(failure),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::DeliveryFailed(msg) => {
                tracing::error!(error = %msg, "Mail delivery failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DELIVERY_FAILED",
                    DELIVERY_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}

/// Status and code for each authentication failure.
pub fn auth_failure_status(failure: &AuthFailure) -> (StatusCode, &'static str) {
    match failure {
        AuthFailure::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        AuthFailure::EmailNotConfirmed => (StatusCode::FORBIDDEN, "EMAIL_NOT_CONFIRMED"),
        AuthFailure::UserAlreadyExists => (StatusCode::CONFLICT, "USER_ALREADY_EXISTS"),
        AuthFailure::TooManyRequests => (StatusCode::TOO_MANY_REQUESTS, "TOO_MANY_REQUESTS"),
        AuthFailure::InvalidEmail => (StatusCode::BAD_REQUEST, "INVALID_EMAIL"),
        AuthFailure::AccountDisabled => (StatusCode::FORBIDDEN, "ACCOUNT_DISABLED"),
        AuthFailure::ConfirmationTokenMissing => {
            (StatusCode::BAD_REQUEST, "CONFIRMATION_TOKEN_MISSING")
        }
        AuthFailure::ConfirmationTokenInvalid => {
            (StatusCode::UNAUTHORIZED, "CONFIRMATION_TOKEN_INVALID")
        }
    }
}

/// Render an auth failure with the `(title, message, suggestion)` triple
/// from the lookup table.
fn auth_failure_response(failure: &AuthFailure) -> Response {
    let (status, code) = auth_failure_status(failure);
    let described = failure.describe();

    let body = json!({
        "error": described.message,
        "title": described.title,
        "suggestion": described.suggestion,
        "code": code,
    });

    (status, axum::Json(body)).into_response()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "リソースが見つかりません".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        "既に登録されています".to_string(),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal_error()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}

/// Whether `err` is a unique violation on the named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
