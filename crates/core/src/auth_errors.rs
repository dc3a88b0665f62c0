//! Translation of authentication errors into user-facing Japanese text.
//!
//! The auth layer reports failures with short English messages (the same
//! phrasing hosted auth providers use, e.g. `"Invalid login credentials"`).
//! [`describe_auth_error`] maps those messages onto a `(title, message,
//! suggestion)` triple by substring, so the table also covers messages that
//! arrive from elsewhere (mail transport, upstream proxies).

use serde::Serialize;

/// A user-facing description of an authentication failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthErrorMessage {
    pub title: String,
    pub message: String,
    pub suggestion: String,
}

impl AuthErrorMessage {
    fn new(title: &str, message: &str, suggestion: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            suggestion: suggestion.to_string(),
        }
    }
}

/// One row of the lookup table: any of `needles` selects the triple.
struct Rule {
    needles: &'static [&'static str],
    title: &'static str,
    message: &'static str,
    suggestion: &'static str,
}

/// Checked top to bottom; the first matching row wins.
const RULES: &[Rule] = &[
    Rule {
        needles: &["email not confirmed", "email_not_confirmed"],
        title: "メール確認が完了していません",
        message: "このメールアドレスはまだ確認されていません。",
        suggestion: "登録時に送信された確認メールを確認して、メール内のリンクをクリックしてください。",
    },
    Rule {
        needles: &["invalid login credentials", "invalid email or password"],
        title: "ログイン認証に失敗しました",
        message: "メールアドレスまたはパスワードが正しくありません。",
        suggestion: "メールアドレスとパスワードをご確認ください。アカウントをお持ちでない場合は、新規登録からアカウントを作成してください。",
    },
    Rule {
        needles: &["user not found"],
        title: "アカウントが見つかりません",
        message: "このメールアドレスで登録されたアカウントが存在しません。",
        suggestion: "メールアドレスをご確認ください。アカウントをお持ちでない場合は、新規登録からアカウントを作成してください。",
    },
    Rule {
        needles: &["invalid password", "password reset", "email_recovery_code_expired"],
        title: "パスワードが無効です",
        message: "パスワードがリセットされているか、有効期限を超えています。",
        suggestion: "パスワードをリセットしてください。（パスワードリセット機能は準備中です）",
    },
    Rule {
        needles: &["invalid email"],
        title: "メールアドレスが無効です",
        message: "メールアドレスの形式が正しくありません。",
        suggestion: "有効なメールアドレスを入力してください。（例: user@example.com）",
    },
    Rule {
        needles: &["rate limit", "too many requests", "too_many_requests"],
        title: "ログイン試行が多すぎます",
        message: "セキュリティ上の理由から、一時的にログインがブロックされてます。",
        suggestion: "数分後にもう一度お試しください。繰り返される場合はお問い合わせください。",
    },
    Rule {
        needles: &["user already exists", "email already registered"],
        title: "アカウントが既に存在します",
        message: "このメールアドレスは既に登録されています。",
        suggestion: "ログインページからログインするか、新しいメールアドレスで登録してください。",
    },
    Rule {
        needles: &["network", "fetch"],
        title: "ネットワークエラー",
        message: "インターネット接続を確認してください。",
        suggestion: "インターネット接続が安定していることを確認してから、もう一度お試しください。",
    },
];

const FALLBACK_TITLE: &str = "ログインに失敗しました";
const FALLBACK_MESSAGE: &str = "ログイン処理中にエラーが発生しました。";
const FALLBACK_SUGGESTION: &str =
    "メールアドレスとパスワードをご確認ください。問題が解決しない場合はお問い合わせください。";

/// Translate a raw auth error message into a user-facing triple.
///
/// Matching is case-insensitive. Unknown messages keep the raw text as the
/// body under a generic title; only an empty message is replaced.
pub fn describe_auth_error(raw: &str) -> AuthErrorMessage {
    let lowered = raw.to_lowercase();

    for rule in RULES {
        if rule.needles.iter().any(|n| lowered.contains(n)) {
            return AuthErrorMessage::new(rule.title, rule.message, rule.suggestion);
        }
    }

    let message = if raw.is_empty() {
        FALLBACK_MESSAGE
    } else {
        raw
    };
    AuthErrorMessage::new(FALLBACK_TITLE, message, FALLBACK_SUGGESTION)
}

/// Failures raised by the login / signup / confirmation flows.
///
/// `Display` yields the raw English message fed to [`describe_auth_error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("アカウントが無効化されています")]
    AccountDisabled,

    #[error("Confirmation token missing")]
    ConfirmationTokenMissing,

    #[error("メール確認に失敗しました。リンクが無効か、有効期限が切れています。")]
    ConfirmationTokenInvalid,
}

impl AuthFailure {
    /// The user-facing triple for this failure.
    pub fn describe(&self) -> AuthErrorMessage {
        match self {
            AuthFailure::ConfirmationTokenMissing => AuthErrorMessage::new(
                "確認トークンが見つかりません",
                "メール内のリンクからアクセスしてください。",
                "登録時に送信されたメール内のリンクをクリックしてください。リンクの有効期限は24時間です。",
            ),
            other => describe_auth_error(&other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfirmed_email_matches_both_spellings() {
        let a = describe_auth_error("Email not confirmed");
        let b = describe_auth_error("error_code=email_not_confirmed");
        assert_eq!(a.title, "メール確認が完了していません");
        assert_eq!(a, b);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let msg = describe_auth_error("INVALID LOGIN CREDENTIALS");
        assert_eq!(msg.title, "ログイン認証に失敗しました");
    }

    #[test]
    fn earlier_rules_take_precedence() {
        // Contains both "invalid email or password" and "invalid email".
        let msg = describe_auth_error("Invalid email or password");
        assert_eq!(msg.title, "ログイン認証に失敗しました");

        let msg = describe_auth_error("Invalid email address format");
        assert_eq!(msg.title, "メールアドレスが無効です");
    }

    #[test]
    fn rate_limit_variants() {
        for raw in ["Rate limit exceeded", "Too many requests", "too_many_requests"] {
            assert_eq!(describe_auth_error(raw).title, "ログイン試行が多すぎます");
        }
    }

    #[test]
    fn network_errors() {
        assert_eq!(describe_auth_error("Failed to fetch").title, "ネットワークエラー");
    }

    #[test]
    fn unknown_message_falls_through_with_raw_text() {
        let msg = describe_auth_error("something odd happened");
        assert_eq!(msg.title, FALLBACK_TITLE);
        assert_eq!(msg.message, "something odd happened");
        assert_eq!(msg.suggestion, FALLBACK_SUGGESTION);
    }

    #[test]
    fn empty_message_uses_generic_text() {
        let msg = describe_auth_error("");
        assert_eq!(msg.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn whitespace_message_is_kept_verbatim() {
        let msg = describe_auth_error("   ");
        assert_eq!(msg.title, FALLBACK_TITLE);
        assert_eq!(msg.message, "   ");
    }

    #[test]
    fn failures_route_through_table() {
        assert_eq!(
            AuthFailure::UserAlreadyExists.describe().title,
            "アカウントが既に存在します"
        );
        assert_eq!(
            AuthFailure::TooManyRequests.describe().title,
            "ログイン試行が多すぎます"
        );
        assert_eq!(
            AuthFailure::InvalidCredentials.describe().title,
            "ログイン認証に失敗しました"
        );
    }

    #[test]
    fn missing_token_has_fixed_triple() {
        let msg = AuthFailure::ConfirmationTokenMissing.describe();
        assert_eq!(msg.title, "確認トークンが見つかりません");
    }

    #[test]
    fn invalid_token_falls_back_with_its_own_text() {
        let msg = AuthFailure::ConfirmationTokenInvalid.describe();
        assert_eq!(msg.title, FALLBACK_TITLE);
        assert!(msg.message.starts_with("メール確認に失敗しました"));
    }
}
