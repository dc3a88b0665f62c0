//! Checks shared by every free-text field.

/// Shown when text contains a character PostgreSQL `TEXT` cannot store.
pub const UNSUPPORTED_CHARACTER: &str = "使用できない文字が含まれています";

/// Reject text containing U+0000. PostgreSQL refuses NUL in text columns and
/// bind parameters.
pub fn ensure_storable(text: &str) -> Result<(), String> {
    if text.contains('\0') {
        return Err(UNSUPPORTED_CHARACTER.to_string());
    }
    Ok(())
}
