//! Handlers for the `/auth` resource (signup, confirm, login, refresh, logout, me).

use applifarm_core::accounts::{is_valid_email, normalize_email, SignupError, SignupRequest};
use applifarm_core::auth_errors::AuthFailure;
use applifarm_core::error::{CoreError, MISSING_FIELDS};
use applifarm_core::types::DbId;
use applifarm_db::models::profile::Profile;
use applifarm_db::models::session::NewSession;
use applifarm_db::models::user::{Registration, User};
use applifarm_db::repositories::{EmailConfirmationRepo, ProfileRepo, SessionRepo, UserRepo};
use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{hash_token, OpaqueToken};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::PROFILE;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

/// Longest `User-Agent` stored with a session.
const MAX_USER_AGENT_CHARS: usize = 512;

const SESSION_EXPIRED: &str = "セッションの有効期限が切れています。再度ログインしてください。";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/confirm`.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub token: Option<String>,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by confirm, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in auth responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Response for `POST /auth/signup`.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: UserInfo,
    pub confirmation_required: bool,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Register an account and send (or log) the email confirmation link.
///
/// Signing up again with an address that was never confirmed issues a fresh
/// link instead of failing, so a lost or expired link can be replaced.
pub async fn signup(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let signup = input.validate().map_err(|e| match e {
        SignupError::Invalid(msg) => AppError::Core(CoreError::Validation(msg)),
        SignupError::InvalidEmail => AppError::from(AuthFailure::InvalidEmail),
    })?;

    let expiry_hours = state.config.confirmation_expiry_hours;
    let confirmation = OpaqueToken::generate();
    let confirmation_expires_at = Utc::now() + Duration::hours(expiry_hours);

    if let Some(existing) = UserRepo::find_by_email(&state.pool, &signup.email).await? {
        if existing.is_confirmed() || !existing.is_active {
            return Err(AuthFailure::UserAlreadyExists.into());
        }

        EmailConfirmationRepo::create(
            &state.pool,
            existing.id,
            &confirmation.hash,
            confirmation_expires_at,
        )
        .await?;
        tracing::info!(user_id = existing.id, "Confirmation link reissued");

        send_confirmation_link(&state, &existing, &confirmation.plaintext).await;

        let full_name = ProfileRepo::find_by_id(&state.pool, existing.id)
            .await?
            .and_then(|p| p.full_name);
        return Ok((
            StatusCode::OK,
            Json(SignupResponse {
                user: UserInfo {
                    id: existing.id,
                    email: existing.email,
                    full_name,
                    avatar_url: None,
                },
                confirmation_required: true,
                message: "確認メールを再送信しました。メール内のリンクをクリックして登録を完了してください。",
            }),
        ));
    }

    let password_hash = hash_password(&signup.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let registration = Registration {
        email: signup.email,
        password_hash,
        full_name: signup.full_name.clone(),
        confirmation_token_hash: confirmation.hash,
        confirmation_expires_at,
    };
    let user = UserRepo::register(&state.pool, &registration)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "uq_users_email") {
                AuthFailure::UserAlreadyExists.into()
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(user_id = user.id, "User registered");

    send_confirmation_link(&state, &user, &confirmation.plaintext).await;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: UserInfo {
                id: user.id,
                email: user.email,
                full_name: Some(signup.full_name),
                avatar_url: None,
            },
            confirmation_required: true,
            message: "確認メールを送信しました。メール内のリンクをクリックして登録を完了してください。",
        }),
    ))
}

/// POST /api/auth/confirm
///
/// Consume an email confirmation token and start a session.
pub async fn confirm(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<ConfirmRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token = input
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthFailure::ConfirmationTokenMissing)?;

    let user_id = EmailConfirmationRepo::consume(&state.pool, &hash_token(token))
        .await?
        .ok_or(AuthFailure::ConfirmationTokenInvalid)?;

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AuthFailure::ConfirmationTokenInvalid)?;

    tracing::info!(user_id, "Email confirmed");

    let response = start_session(&state, &user, &headers).await?;
    Ok(Json(response))
}

/// POST /api/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.as_deref().map(normalize_email).unwrap_or_default();
    let password = input.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(MISSING_FIELDS.into())));
    }
    if !is_valid_email(&email) {
        return Err(AuthFailure::InvalidCredentials.into());
    }

    // 1. Find user by email.
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or(AuthFailure::InvalidCredentials)?;

    // 2. Check if the account is active.
    if !user.is_active {
        return Err(AuthFailure::AccountDisabled.into());
    }

    // 3. Check if the account is temporarily locked.
    if user.locked_until.is_some_and(|until| until > Utc::now()) {
        return Err(AuthFailure::TooManyRequests.into());
    }

    // 4. Verify password.
    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: increment counter, lock if threshold reached.
        let failures = UserRepo::increment_failed_login(&state.pool, user.id).await?;
        if failures >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, failures, "Account locked after failed logins");
        }
        return Err(AuthFailure::InvalidCredentials.into());
    }

    // 6. Only confirmed addresses may sign in.
    if !user.is_confirmed() {
        return Err(AuthFailure::EmailNotConfirmed.into());
    }

    // 7. On success: reset failed count, set last_login_at.
    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let response = start_session(&state, &user, &headers).await?;
    Ok(Json(response))
}

/// POST /api/auth/refresh
///
/// Exchange a live refresh token for a new pair. The old refresh token stops
/// working.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let refresh = OpaqueToken::generate();
    let next = new_session(&state, &refresh, &headers);

    let session = SessionRepo::rotate(&state.pool, &hash_token(&input.refresh_token), &next)
        .await?
        .ok_or_else(session_expired)?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(session_expired)?;

    let response = auth_response(&state, &user, refresh.plaintext).await?;
    Ok(Json(response))
}

/// POST /api/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<Profile>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: PROFILE,
            id: auth_user.user_id,
        }))?;
    Ok(Json(profile))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mail the confirmation link, or log it when mail is not configured. A
/// failed send is logged; the user can sign up again for a new link.
async fn send_confirmation_link(state: &AppState, user: &User, token: &str) {
    let link = format!("{}/auth/confirm?token={token}", state.config.site_url);
    let expiry_hours = state.config.confirmation_expiry_hours;

    match &state.mailer {
        Some(mailer) => {
            if let Err(e) = mailer
                .send_confirmation(&user.email, &link, expiry_hours)
                .await
            {
                tracing::error!(user_id = user.id, error = %e, "Failed to send confirmation email");
            }
        }
        None => {
            tracing::info!(
                user_id = user.id,
                email = %user.email,
                %link,
                "Email delivery not configured, confirmation link logged"
            );
        }
    }
}

fn session_expired() -> AppError {
    AppError::Core(CoreError::Unauthorized(SESSION_EXPIRED.into()))
}

fn new_session(state: &AppState, refresh: &OpaqueToken, headers: &HeaderMap) -> NewSession {
    NewSession {
        refresh_token_hash: refresh.hash.clone(),
        expires_at: Utc::now() + Duration::days(state.config.jwt.refresh_token_expiry_days),
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|ua| ua.chars().take(MAX_USER_AGENT_CHARS).collect()),
    }
}

/// Persist a fresh session for `user` and build the token response.
async fn start_session(
    state: &AppState,
    user: &User,
    headers: &HeaderMap,
) -> AppResult<AuthResponse> {
    let refresh = OpaqueToken::generate();
    SessionRepo::start(&state.pool, user.id, &new_session(state, &refresh, headers)).await?;
    auth_response(state, user, refresh.plaintext).await
}

/// Mint an access token and pair it with `refresh_token`.
async fn auth_response(
    state: &AppState,
    user: &User,
    refresh_token: String,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (full_name, avatar_url) = ProfileRepo::find_by_id(&state.pool, user.id)
        .await?
        .map(|p| (p.full_name, p.avatar_url))
        .unwrap_or_default();

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: state.config.jwt.access_token_ttl_secs(),
        user: UserInfo {
            id: user.id,
            email: user.email.clone(),
            full_name,
            avatar_url,
        },
    })
}
