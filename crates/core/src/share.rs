//! Social share links for a project page.

use serde::Serialize;

/// Site name appended to shared titles.
pub const SITE_NAME: &str = "Appli Farm";

/// Prebuilt share URLs for a project page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub page: String,
    pub twitter: String,
    pub facebook: String,
    pub line: String,
}

/// Build share URLs for `page_url` with the text `"{title} - Appli Farm"`.
pub fn share_links(page_url: &str, title: &str) -> ShareLinks {
    let url = urlencoding::encode(page_url);
    let text = urlencoding::encode(&format!("{title} - {SITE_NAME}")).into_owned();

    ShareLinks {
        page: page_url.to_string(),
        twitter: format!("https://twitter.com/intent/tweet?text={text}&url={url}"),
        facebook: format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
        line: format!("https://line.me/R/msg/text/?{text}%20{url}"),
    }
}

/// Public URL of a project page under `site_url`.
pub fn project_page_url(site_url: &str, project_id: crate::types::DbId) -> String {
    format!("{}/projects/{project_id}", site_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_title_and_url() {
        let links = share_links("https://applifarm.jp/projects/7", "家計簿 & メモ");
        assert_eq!(links.page, "https://applifarm.jp/projects/7");
        assert!(links
            .twitter
            .ends_with("&url=https%3A%2F%2Fapplifarm.jp%2Fprojects%2F7"));
        assert!(links.twitter.contains("%26"));
        assert!(!links.twitter.contains(' '));
        assert_eq!(
            links.facebook,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fapplifarm.jp%2Fprojects%2F7"
        );
        assert!(links.line.starts_with("https://line.me/R/msg/text/?"));
        assert!(links.line.contains("%20https%3A"));
    }

    #[test]
    fn page_url_tolerates_trailing_slash() {
        assert_eq!(
            project_page_url("https://applifarm.jp/", 3),
            "https://applifarm.jp/projects/3"
        );
    }
}
