//! Server settings read from the environment (and `.env` via `dotenvy`).

use std::fmt::Display;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Public base URL of the site without a trailing slash. Confirmation
    /// links and share links are built on it.
    pub site_url: String,
    /// How long an email confirmation link stays valid.
    pub confirmation_expiry_hours: i64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// | Env Var                     | Default                  |
    /// |-----------------------------|--------------------------|
    /// | `HOST`                      | `0.0.0.0`                |
    /// | `PORT`                      | `3000`                   |
    /// | `CORS_ORIGINS`              | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                     |
    /// | `SITE_URL`                  | `http://localhost:3000`  |
    /// | `CONFIRMATION_EXPIRY_HOURS` | `24`                     |
    ///
    /// `CORS_ORIGINS` is comma-separated. JWT settings come from
    /// [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let site_url: String = env_or("SITE_URL", "http://localhost:3000".to_string());

        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins: split_origins(&env_or(
                "CORS_ORIGINS",
                "http://localhost:3000".to_string(),
            )),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            site_url: site_url.trim_end_matches('/').to_string(),
            confirmation_expiry_hours: env_or("CONFIRMATION_EXPIRY_HOURS", 24),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse; bad config fails at
/// startup.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} is invalid ({raw:?}): {e}")),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
