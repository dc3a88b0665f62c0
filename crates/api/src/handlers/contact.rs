//! Handler for the public contact form.

use applifarm_core::contact::ContactRequest;
use applifarm_core::error::CoreError;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Response for `POST /contact`.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// POST /api/contact
///
/// Forward the message through Resend when configured, otherwise log it.
pub async fn submit_contact(
    State(state): State<AppState>,
    AppJson(input): AppJson<ContactRequest>,
) -> AppResult<Json<ContactResponse>> {
    let message = input.validate().map_err(CoreError::Validation)?;

    let Some(client) = &state.contact_mailer else {
        tracing::info!(
            name = %message.name,
            email = %message.email,
            subject = %message.subject,
            body = %message.message,
            "Contact message received (email delivery not configured)"
        );
        return Ok(Json(ContactResponse {
            success: true,
            message: "お問い合わせを受け付けました。管理者が確認いたします。",
            note: Some("メール通知は設定されていません。ログをご確認ください。"),
        }));
    };

    client.send(&message).await.map_err(|e| {
        tracing::error!(error = %e, email = %message.email, "Failed to forward contact message");
        AppError::DeliveryFailed(e.to_string())
    })?;

    tracing::info!(email = %message.email, "Contact message forwarded");

    Ok(Json(ContactResponse {
        success: true,
        message: "お問い合わせを送信しました",
        note: None,
    }))
}
