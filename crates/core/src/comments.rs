//! Comment content rules.

use crate::error::MISSING_FIELDS;
use crate::text::ensure_storable;

/// Maximum length of a comment in characters, measured after trimming.
pub const MAX_COMMENT_LENGTH: usize = 100;

/// Validate comment text and return it trimmed.
///
/// Blank input is reported as a missing field; length is counted in Unicode
/// scalar values so Japanese text gets the full 100 characters.
pub fn validate_comment_content(raw: &str) -> Result<String, String> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(MISSING_FIELDS.to_string());
    }
    ensure_storable(content)?;
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(format!(
            "コメントは{MAX_COMMENT_LENGTH}文字以内で入力してください"
        ));
    }
    Ok(content.to_string())
}
