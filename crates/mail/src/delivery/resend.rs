//! Contact message forwarding via the Resend HTTP API.
//!
//! [`ResendClient`] POSTs one JSON email per contact message. There is a
//! single attempt with a request timeout; the caller reports failure to the
//! user instead of retrying.

use std::time::Duration;

use applifarm_core::contact::ContactMessage;

/// Resend "send email" endpoint.
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// HTTP request timeout for a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_FROM_ADDRESS: &str = "contact@applifarm.jp";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ResendError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Resend answered with a non-2xx status code.
    #[error("Resend returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// ResendConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    /// Sender address; must be on a domain verified with Resend.
    pub from_address: String,
    /// Where contact messages are delivered.
    pub to_address: String,
    pub endpoint: String,
}

impl ResendConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both `RESEND_API_KEY` and `CONTACT_TO` are set.
    ///
    /// | Variable         | Required | Default                |
    /// |------------------|----------|------------------------|
    /// | `RESEND_API_KEY` | yes      | -                      |
    /// | `CONTACT_TO`     | yes      | -                      |
    /// | `CONTACT_FROM`   | no       | `contact@applifarm.jp` |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("RESEND_API_KEY").ok()?;
        let Ok(to_address) = std::env::var("CONTACT_TO") else {
            tracing::warn!("RESEND_API_KEY is set but CONTACT_TO is not; contact mail disabled");
            return None;
        };
        Some(Self {
            api_key,
            from_address: std::env::var("CONTACT_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            to_address,
            endpoint: RESEND_API_URL.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// ResendClient
// ---------------------------------------------------------------------------

pub struct ResendClient {
    client: reqwest::Client,
    config: ResendConfig,
}

impl ResendClient {
    pub fn new(config: ResendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Forward a contact message. Replies go to the sender's address.
    pub async fn send(&self, message: &ContactMessage) -> Result<(), ResendError> {
        let payload = serde_json::json!({
            "from": self.config.from_address,
            "to": self.config.to_address,
            "reply_to": message.email,
            "subject": message.forwarded_subject(),
            "html": message.render_html(),
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Resend API error");
            return Err(ResendError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(reply_to = %message.email, "Contact message forwarded");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
