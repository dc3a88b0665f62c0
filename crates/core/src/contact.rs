//! Contact form rules and message formatting.

use serde::Deserialize;

use crate::accounts::is_valid_email;
use crate::text::ensure_storable;

/// Subject prefix for contact messages forwarded to the site owner.
pub const SUBJECT_PREFIX: &str = "【Appli Farm お問い合わせ】";

pub const ALL_FIELDS_REQUIRED: &str = "すべての項目を入力してください";
pub const INVALID_EMAIL: &str = "有効なメールアドレスを入力してください";

/// Contact form body. Fields are optional so absence maps to a localized
/// message rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A validated contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(self) -> Result<ContactMessage, String> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let (Some(name), Some(email), Some(subject), Some(message)) = (
            present(self.name),
            present(self.email),
            present(self.subject),
            present(self.message),
        ) else {
            return Err(ALL_FIELDS_REQUIRED.to_string());
        };
        for field in [&name, &email, &subject, &message] {
            ensure_storable(field)?;
        }

        let email = email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(INVALID_EMAIL.to_string());
        }

        Ok(ContactMessage {
            name,
            email,
            subject,
            message,
        })
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

impl ContactMessage {
    /// Subject line of the forwarded email.
    pub fn forwarded_subject(&self) -> String {
        format!("{SUBJECT_PREFIX}{}", self.subject)
    }

    /// HTML body of the forwarded email. Every user-supplied value is escaped.
    pub fn render_html(&self) -> String {
        format!(
            "<h2>新しいお問い合わせがあります</h2>\
             <p><strong>お名前:</strong> {}</p>\
             <p><strong>メールアドレス:</strong> {}</p>\
             <p><strong>件名:</strong> {}</p>\
             <p><strong>メッセージ:</strong></p>\
             <pre style=\"white-space: pre-wrap; word-wrap: break-word;\">{}</pre>",
            escape_html(&self.name),
            escape_html(&self.email),
            escape_html(&self.subject),
            escape_html(&self.message),
        )
    }
}
