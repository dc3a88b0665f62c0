//! Signup confirmation mail over SMTP (STARTTLS).
//!
//! The transport and sender are built once in [`EmailDelivery::new`] and
//! reused for every message. Without `SMTP_HOST` there is no mailer and the
//! API logs confirmation links instead.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use applifarm_core::contact::escape_html;
use applifarm_core::share::SITE_NAME;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(#[from] lettre::error::Error),
}

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@applifarm.jp";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Bare sender address; the display name is always the site name.
    pub from_address: String,
    /// Login for authenticated relays. Both halves must be set to be used.
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// `None` when `SMTP_HOST` is unset.
    ///
    /// | Variable        | Default                |
    /// |-----------------|------------------------|
    /// | `SMTP_HOST`     | (required)             |
    /// | `SMTP_PORT`     | `587`                  |
    /// | `SMTP_FROM`     | `noreply@applifarm.jp` |
    /// | `SMTP_USER`     | -                      |
    /// | `SMTP_PASSWORD` | -                      |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok().filter(|h| !h.is_empty())?;
        let smtp_port = match std::env::var("SMTP_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, fallback = DEFAULT_SMTP_PORT, "SMTP_PORT is not a port number");
                DEFAULT_SMTP_PORT
            }),
            Err(_) => DEFAULT_SMTP_PORT,
        };

        Some(Self {
            smtp_host,
            smtp_port,
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Subject line of the signup confirmation email.
pub fn confirmation_subject() -> String {
    format!("【{SITE_NAME}】メールアドレスの確認")
}

/// Plain-text part of the confirmation email.
pub fn confirmation_text(link: &str, expiry_hours: i64) -> String {
    format!(
        "{SITE_NAME} へのご登録ありがとうございます。\n\n\
         以下のリンクをクリックして、メールアドレスの確認を完了してください。\n\
         {link}\n\n\
         リンクの有効期限は{expiry_hours}時間です。\n\
         このメールに心当たりがない場合は、破棄してください。\n"
    )
}

/// HTML part of the confirmation email.
pub fn confirmation_html(link: &str, expiry_hours: i64) -> String {
    let link = escape_html(link);
    format!(
        "<div style=\"font-family: sans-serif; line-height: 1.6;\">\
         <p>{SITE_NAME} へのご登録ありがとうございます。</p>\
         <p>以下のボタンから、メールアドレスの確認を完了してください。</p>\
         <p><a href=\"{link}\" style=\"display: inline-block; padding: 10px 20px; \
         background: #16a34a; color: #fff; border-radius: 6px; text-decoration: none;\">\
         メールアドレスを確認する</a></p>\
         <p style=\"color: #666; font-size: 12px;\">リンクの有効期限は{expiry_hours}時間です。\
         このメールに心当たりがない場合は、破棄してください。</p>\
         </div>"
    )
}

pub struct EmailDelivery {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailDelivery {
    /// Fails if the host cannot be used for STARTTLS or the sender address
    /// does not parse. No connection is made until the first send.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let from = Mailbox::new(
            Some(SITE_NAME.to_string()),
            config.from_address.parse::<Address>()?,
        );

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
        if let (Some(user), Some(password)) = (config.smtp_user, config.smtp_password) {
            builder = builder.credentials(Credentials::new(user, password));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Send the confirmation link to a newly registered address.
    pub async fn send_confirmation(
        &self,
        to_email: &str,
        link: &str,
        expiry_hours: i64,
    ) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to_email.parse::<Mailbox>()?)
            .subject(confirmation_subject())
            .multipart(MultiPart::alternative_plain_html(
                confirmation_text(link, expiry_hours),
                confirmation_html(link, expiry_hours),
            ))?;

        self.transport.send(message).await?;
        tracing::info!(to = to_email, "Confirmation email sent");
        Ok(())
    }
}
