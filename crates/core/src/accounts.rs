//! Signup and profile rules.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::MISSING_FIELDS;
use crate::text::UNSUPPORTED_CHARACTER;
use crate::projects::validate_url;
use crate::text::ensure_storable;

pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;

/// Shown when the terms checkbox was not ticked.
pub const TERMS_NOT_ACCEPTED: &str = "利用規約と個人情報保護方針に同意する必要があります";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// `local@domain.tld` with no whitespace and exactly one `@` per side.
pub fn is_valid_email(email: &str) -> bool {
    ensure_storable(email).is_ok() && EMAIL.is_match(email)
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Raw signup request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    #[serde(default)]
    pub agreed_to_terms: bool,
}

/// Signup data after presence checks and normalization.
#[derive(Debug, Clone, Validate)]
pub struct ValidSignup {
    pub email: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "パスワードは6文字以上128文字以内で入力してください"
    ))]
    pub password: String,
    #[validate(length(
        min = 1,
        max = 50,
        message = "表示名は50文字以内で入力してください"
    ))]
    pub full_name: String,
}

/// Failure of signup validation: either a plain message or an invalid email,
/// which goes through the auth error table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    Invalid(String),
    InvalidEmail,
}

impl SignupRequest {
    pub fn validate(self) -> Result<ValidSignup, SignupError> {
        if !self.agreed_to_terms {
            return Err(SignupError::Invalid(TERMS_NOT_ACCEPTED.to_string()));
        }

        let email = self.email.as_deref().map(normalize_email).unwrap_or_default();
        let password = self.password.unwrap_or_default();
        let full_name = self
            .full_name
            .map(|n| n.trim().to_string())
            .unwrap_or_default();

        if email.is_empty() || password.is_empty() || full_name.is_empty() {
            return Err(SignupError::Invalid(MISSING_FIELDS.to_string()));
        }
        ensure_storable(&full_name).map_err(SignupError::Invalid)?;
        if !is_valid_email(&email) {
            return Err(SignupError::InvalidEmail);
        }

        let signup = ValidSignup {
            email,
            password,
            full_name,
        };
        signup
            .validate()
            .map_err(|e| SignupError::Invalid(first_message(&e, &["password", "full_name"])))?;
        Ok(signup)
    }
}

/// Raw profile update body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Validated profile update. `avatar_url: Some(None)` removes the avatar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub avatar_url: Option<Option<String>>,
}

impl ProfileUpdateRequest {
    pub fn validate(self) -> Result<ProfilePatch, String> {
        let full_name = match self.full_name.map(|n| n.trim().to_string()) {
            None => None,
            Some(n) if n.is_empty() => return Err(MISSING_FIELDS.to_string()),
            Some(n) if ensure_storable(&n).is_err() => {
                return Err(UNSUPPORTED_CHARACTER.to_string())
            }
            Some(n) if n.chars().count() > MAX_DISPLAY_NAME_LENGTH => {
                return Err("表示名は50文字以内で入力してください".to_string())
            }
            Some(n) => Some(n),
        };

        let avatar_url = match self.avatar_url.map(|u| u.trim().to_string()) {
            None => None,
            Some(u) if u.is_empty() => Some(None),
            Some(u) => {
                validate_url(&u, "アバター画像URL")?;
                Some(Some(u))
            }
        };

        Ok(ProfilePatch {
            full_name,
            avatar_url,
        })
    }
}

/// Pick the first failing field's message, in the given field order.
fn first_message(errors: &ValidationErrors, order: &[&str]) -> String {
    let fields = errors.field_errors();
    order
        .iter()
        .filter_map(|name| fields.get(*name))
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "入力内容が正しくありません".to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn request() -> SignupRequest {
        SignupRequest {
            email: Some(" Farmer@Example.com ".into()),
            password: Some("secret1".into()),
            full_name: Some(" たろう ".into()),
            agreed_to_terms: true,
        }
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@c.com"));
    }

    #[test]
    fn valid_signup_is_normalized() {
        let s = request().validate().unwrap();
        assert_eq!(s.email, "farmer@example.com");
        assert_eq!(s.full_name, "たろう");
    }

    #[test]
    fn terms_must_be_accepted_first() {
        let mut r = request();
        r.agreed_to_terms = false;
        r.password = None;
        assert_eq!(
            r.validate().unwrap_err(),
            SignupError::Invalid(TERMS_NOT_ACCEPTED.into())
        );
    }

    #[test]
    fn missing_fields() {
        let mut r = request();
        r.full_name = Some("  ".into());
        assert_eq!(
            r.validate().unwrap_err(),
            SignupError::Invalid(MISSING_FIELDS.into())
        );
    }

    #[test]
    fn bad_email_is_reported_as_auth_failure() {
        let mut r = request();
        r.email = Some("nope".into());
        assert_matches!(r.validate(), Err(SignupError::InvalidEmail));
    }

    #[test]
    fn short_password() {
        let mut r = request();
        r.password = Some("12345".into());
        assert_matches!(r.validate(), Err(SignupError::Invalid(msg)) if msg.contains("6文字以上"));
    }

    #[test]
    fn long_display_name() {
        let mut r = request();
        r.full_name = Some("名".repeat(51));
        assert_matches!(r.validate(), Err(SignupError::Invalid(msg)) if msg.contains("表示名"));
    }

    #[test]
    fn nul_character_is_rejected() {
        let mut r = request();
        r.full_name = Some("たろ\0う".into());
        assert_eq!(
            r.validate().unwrap_err(),
            SignupError::Invalid(UNSUPPORTED_CHARACTER.into())
        );

        let mut r = request();
        r.email = Some("farmer\0@example.com".into());
        assert_matches!(r.validate(), Err(SignupError::InvalidEmail));

        let err = ProfileUpdateRequest {
            full_name: Some("はな\0こ".into()),
            avatar_url: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, UNSUPPORTED_CHARACTER);
    }

    #[test]
    fn profile_patch() {
        let p = ProfileUpdateRequest {
            full_name: Some(" はなこ ".into()),
            avatar_url: Some(String::new()),
        }
        .validate()
        .unwrap();
        assert_eq!(p.full_name.as_deref(), Some("はなこ"));
        assert_eq!(p.avatar_url, Some(None));

        let err = ProfileUpdateRequest {
            full_name: None,
            avatar_url: Some("file:///etc/passwd".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, "アバター画像URLの形式が正しくありません");
    }
}
