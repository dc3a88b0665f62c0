//! Project update log ("改善履歴") rules.

use crate::error::MISSING_FIELDS;
use crate::text::ensure_storable;

/// Maximum length of one update entry in characters, measured after trimming.
pub const MAX_UPDATE_LENGTH: usize = 50;

/// Validate update text and return it trimmed.
pub fn validate_update_content(raw: &str) -> Result<String, String> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(MISSING_FIELDS.to_string());
    }
    ensure_storable(content)?;
    if content.chars().count() > MAX_UPDATE_LENGTH {
        return Err(format!(
            "改善履歴は{MAX_UPDATE_LENGTH}文字以内で入力してください"
        ));
    }
    Ok(content.to_string())
}

/// Message for an owner check failing on create.
pub const NOT_OWNER_ON_CREATE: &str = "このプロジェクトの改善履歴を追加する権限がありません";
