//! Project field rules: required fields, URL shape, categories, and tags.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::MISSING_FIELDS;
use crate::text::ensure_storable;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Categories a project may be filed under.
pub const CATEGORIES: &[&str] = &[
    "Webアプリ",
    "モバイルアプリ",
    "デスクトップアプリ",
    "Webサイト",
    "ツール・ユーティリティ",
    "ゲーム",
    "その他",
];

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;
pub const MAX_URL_LENGTH: usize = 2048;
pub const MAX_TAGS: usize = 10;
pub const MAX_TAG_LENGTH: usize = 30;

/// Number of projects shown in the "recent" strip on the home page.
pub const RECENT_LIMIT: i64 = 6;

/// Default and maximum page size for project listings.
pub const DEFAULT_LIST_LIMIT: i64 = 24;
pub const MAX_LIST_LIMIT: i64 = 100;

static HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Input shapes
// ---------------------------------------------------------------------------

/// Tags arrive either as the comma-separated text of the form field or as a
/// JSON array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    Csv(String),
    List(Vec<String>),
}

/// Raw project fields from a create or update request. Every field is
/// optional at this stage so that missing values produce a localized message
/// instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<TagsInput>,
}

/// A fully validated new project.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// A validated partial update. `None` leaves the column untouched;
/// `image_url: Some(None)` clears the image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<Option<String>>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl ProjectFields {
    /// Validate fields for a new project. Title, description, and URL are
    /// required.
    pub fn into_new_project(self) -> Result<NewProject, String> {
        let title = required(self.title)?;
        let description = required(self.description)?;
        let url = required(self.url)?;

        validate_title(&title)?;
        validate_description(&description)?;
        validate_url(&url, "URL")?;
        let image_url = normalize_image_url(self.image_url)?;
        let categories = validate_categories(self.categories.unwrap_or_default())?;
        let tags = self.tags.map(normalize_tags).transpose()?.unwrap_or_default();

        Ok(NewProject {
            title,
            description,
            url,
            image_url,
            categories,
            tags,
        })
    }

    /// Validate the fields present in an update request.
    pub fn into_patch(self) -> Result<ProjectPatch, String> {
        let title = self.title.map(|t| required(Some(t))).transpose()?;
        if let Some(ref t) = title {
            validate_title(t)?;
        }
        let description = self.description.map(|d| required(Some(d))).transpose()?;
        if let Some(ref d) = description {
            validate_description(d)?;
        }
        let url = self.url.map(|u| required(Some(u))).transpose()?;
        if let Some(ref u) = url {
            validate_url(u, "URL")?;
        }
        let image_url = match self.image_url {
            None => None,
            Some(raw) => Some(normalize_image_url(Some(raw))?),
        };
        let categories = self.categories.map(validate_categories).transpose()?;
        let tags = self.tags.map(normalize_tags).transpose()?;

        Ok(ProjectPatch {
            title,
            description,
            url,
            image_url,
            categories,
            tags,
        })
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

fn required(value: Option<String>) -> Result<String, String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => {
            ensure_storable(&v)?;
            Ok(v)
        }
        _ => Err(MISSING_FIELDS.to_string()),
    }
}

fn validate_title(title: &str) -> Result<(), String> {
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "タイトルは{MAX_TITLE_LENGTH}文字以内で入力してください"
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), String> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(format!(
            "説明は{MAX_DESCRIPTION_LENGTH}文字以内で入力してください"
        ));
    }
    Ok(())
}

/// Validate that `url` is an absolute http(s) URL. `label` names the field in
/// the error message.
pub fn validate_url(url: &str, label: &str) -> Result<(), String> {
    ensure_storable(url)?;
    if url.len() > MAX_URL_LENGTH || !HTTP_URL.is_match(url) {
        return Err(format!("{label}の形式が正しくありません"));
    }
    Ok(())
}

/// Blank image URLs mean "no image".
fn normalize_image_url(raw: Option<String>) -> Result<Option<String>, String> {
    let Some(raw) = raw else { return Ok(None) };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    validate_url(trimmed, "画像URL")?;
    Ok(Some(trimmed.to_string()))
}

/// Check every category against [`CATEGORIES`], dropping blanks and
/// duplicates.
pub fn validate_categories(categories: Vec<String>) -> Result<Vec<String>, String> {
    let mut out: Vec<String> = Vec::with_capacity(categories.len());
    for cat in categories {
        let cat = cat.trim();
        if cat.is_empty() {
            continue;
        }
        if !CATEGORIES.contains(&cat) {
            return Err(format!("不明なカテゴリです: {cat}"));
        }
        if !out.iter().any(|c| c == cat) {
            out.push(cat.to_string());
        }
    }
    Ok(out)
}

/// Split comma-separated tag text, trimming each entry and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize either tag representation: trim, drop empties and duplicates,
/// then enforce the count and length limits.
pub fn normalize_tags(input: TagsInput) -> Result<Vec<String>, String> {
    let candidates = match input {
        TagsInput::Csv(raw) => parse_tags(&raw),
        TagsInput::List(list) => list
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    };

    let mut tags: Vec<String> = Vec::with_capacity(candidates.len());
    for tag in candidates {
        ensure_storable(&tag)?;
        if tag.chars().count() > MAX_TAG_LENGTH {
            return Err(format!("タグは{MAX_TAG_LENGTH}文字以内で入力してください"));
        }
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    if tags.len() > MAX_TAGS {
        return Err(format!("タグは{MAX_TAGS}個まで登録できます"));
    }
    Ok(tags)
}

/// Clamp a requested page size into `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// Negative offsets are treated as zero.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::UNSUPPORTED_CHARACTER;

    fn fields(title: &str, description: &str, url: &str) -> ProjectFields {
        ProjectFields {
            title: Some(title.into()),
            description: Some(description.into()),
            url: Some(url.into()),
            ..Default::default()
        }
    }

    #[test]
    fn parse_tags_splits_and_trims() {
        assert_eq!(
            parse_tags("React, TypeScript ,, Tailwind ,"),
            vec!["React", "TypeScript", "Tailwind"]
        );
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn normalize_tags_dedupes_and_limits() {
        let tags = normalize_tags(TagsInput::List(vec![
            "Rust".into(),
            " Rust ".into(),
            "axum".into(),
        ]))
        .unwrap();
        assert_eq!(tags, vec!["Rust", "axum"]);

        let many = (0..=MAX_TAGS).map(|i| format!("t{i}")).collect::<Vec<_>>().join(",");
        assert!(normalize_tags(TagsInput::Csv(many)).is_err());

        let long = "x".repeat(MAX_TAG_LENGTH + 1);
        assert!(normalize_tags(TagsInput::Csv(long)).is_err());
    }

    #[test]
    fn new_project_requires_core_fields() {
        let mut f = fields("Todo", "説明", "https://example.com");
        f.url = None;
        assert_eq!(f.into_new_project().unwrap_err(), MISSING_FIELDS);

        let f = fields("   ", "説明", "https://example.com");
        assert_eq!(f.into_new_project().unwrap_err(), MISSING_FIELDS);
    }

    #[test]
    fn new_project_normalizes_optional_fields() {
        let mut f = fields(" Todo ", "説明", "https://example.com");
        f.image_url = Some("  ".into());
        f.categories = Some(vec!["Webアプリ".into(), "Webアプリ".into()]);
        f.tags = Some(TagsInput::Csv("React, Rust".into()));

        let p = f.into_new_project().unwrap();
        assert_eq!(p.title, "Todo");
        assert_eq!(p.image_url, None);
        assert_eq!(p.categories, vec!["Webアプリ"]);
        assert_eq!(p.tags, vec!["React", "Rust"]);
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(fields("a", "b", "ftp://example.com").into_new_project().is_err());
        assert!(fields("a", "b", "javascript:alert(1)").into_new_project().is_err());
        assert!(fields("a", "b", "http://localhost:3000/app").into_new_project().is_ok());

        let mut f = fields("a", "b", "https://example.com");
        f.image_url = Some("not a url".into());
        assert_eq!(
            f.into_new_project().unwrap_err(),
            "画像URLの形式が正しくありません"
        );
    }

    #[test]
    fn rejects_unknown_category() {
        let mut f = fields("a", "b", "https://example.com");
        f.categories = Some(vec!["宇宙船".into()]);
        assert_eq!(f.into_new_project().unwrap_err(), "不明なカテゴリです: 宇宙船");
    }

    #[test]
    fn title_length_boundary() {
        let ok = "t".repeat(MAX_TITLE_LENGTH);
        assert!(fields(&ok, "b", "https://e.com").into_new_project().is_ok());
        let too_long = "t".repeat(MAX_TITLE_LENGTH + 1);
        assert!(fields(&too_long, "b", "https://e.com").into_new_project().is_err());
    }

    #[test]
    fn patch_only_validates_present_fields() {
        let patch = ProjectFields {
            description: Some("新しい説明".into()),
            ..Default::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(patch.description.as_deref(), Some("新しい説明"));
        assert_eq!(patch.title, None);
        assert_eq!(patch.image_url, None);
    }

    #[test]
    fn patch_blank_image_clears_it() {
        let patch = ProjectFields {
            image_url: Some(String::new()),
            ..Default::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(patch.image_url, Some(None));
    }

    #[test]
    fn nul_character_is_rejected_in_every_text_field() {
        let f = fields("Todo\0", "説明", "https://example.com");
        assert_eq!(f.into_new_project().unwrap_err(), UNSUPPORTED_CHARACTER);

        let f = fields("Todo", "説明", "https://example.com/\0");
        assert_eq!(f.into_new_project().unwrap_err(), UNSUPPORTED_CHARACTER);

        let mut f = fields("Todo", "説明", "https://example.com");
        f.tags = Some(TagsInput::List(vec!["ok".into(), "b\0d".into()]));
        assert_eq!(f.into_new_project().unwrap_err(), UNSUPPORTED_CHARACTER);

        let res = ProjectFields {
            description: Some("\0".into()),
            ..Default::default()
        }
        .into_patch();
        assert_eq!(res.unwrap_err(), UNSUPPORTED_CHARACTER);
    }

    #[test]
    fn patch_rejects_blank_title() {
        let res = ProjectFields {
            title: Some("  ".into()),
            ..Default::default()
        }
        .into_patch();
        assert_eq!(res.unwrap_err(), MISSING_FIELDS);
    }

    #[test]
    fn tags_deserialize_from_string_or_array() {
        let f: ProjectFields = serde_json::from_str(r#"{"tags": "a, b"}"#).unwrap();
        assert!(matches!(f.tags, Some(TagsInput::Csv(_))));
        let f: ProjectFields = serde_json::from_str(r#"{"tags": ["a", "b"]}"#).unwrap();
        assert!(matches!(f.tags, Some(TagsInput::List(_))));
    }

    #[test]
    fn clamps() {
        assert_eq!(clamp_limit(None), DEFAULT_LIST_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), MAX_LIST_LIMIT);
        assert_eq!(clamp_offset(Some(-5)), 0);
        assert_eq!(clamp_offset(Some(12)), 12);
    }
}
