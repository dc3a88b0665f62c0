use std::sync::Arc;

use applifarm_mail::{EmailDelivery, ResendClient};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: applifarm_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// SMTP mailer for confirmation emails; `None` logs the link instead.
    pub mailer: Option<Arc<EmailDelivery>>,
    /// Resend client for contact messages; `None` logs the message instead.
    pub contact_mailer: Option<Arc<ResendClient>>,
}
