//! Social/SEO metadata for the single-post view, derived ahead of render so
//! the tags land in the document head of the response.

use crate::config::SiteConfig;
use crate::models::Post;
use chrono::SecondsFormat;
use serde::Serialize;

pub const DEFAULT_DESCRIPTION_LENGTH: usize = 165;

const NOT_FOUND_TITLE: &str = "Post Not Found";
const NOT_FOUND_DESCRIPTION: &str = "The requested post could not be found.";
const COVER_ALT_FALLBACK: &str = "Blog post cover image";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical: Option<String>,
    pub og_image: Option<OgImage>,
    pub twitter_card: &'static str,
    pub published_time: Option<String>,
    pub author: Option<String>,
}

impl PageMetadata {
    /// Fixed fallback for a slug the API cannot serve. The resolver never
    /// propagates an upstream failure past this point.
    pub fn not_found() -> Self {
        Self {
            title: NOT_FOUND_TITLE.to_string(),
            description: NOT_FOUND_DESCRIPTION.to_string(),
            canonical: None,
            og_image: None,
            twitter_card: "summary",
            published_time: None,
            author: None,
        }
    }

    pub fn for_post(post: &Post, site: &SiteConfig, description_length: usize) -> Self {
        let title = post.display_title().to_string();

        let og_image = post.cover().map(|url| OgImage {
            url: url.to_string(),
            width: 1200,
            height: 630,
            alt: post
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| COVER_ALT_FALLBACK.to_string()),
        });

        Self {
            description: short_description(&post.content, description_length),
            canonical: Some(canonical_url(&site.url, &post.slug)),
            twitter_card: if og_image.is_some() {
                "summary_large_image"
            } else {
                "summary"
            },
            og_image,
            published_time: post
                .created()
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            author: Some(post.author(&site.default_author).to_string()),
            title,
        }
    }
}

/// Site base with any trailing slash stripped, joined with the slug.
pub fn canonical_url(site_url: &str, slug: &str) -> String {
    format!("{}/{}", site_url.trim_end_matches('/'), slug)
}

/// Trim `text` to at most `max_len` characters, cutting at the last space
/// within the prefix when one exists, and append an ellipsis marker. Text
/// already within the limit passes through unchanged.
pub fn short_description(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let prefix: String = text.chars().take(max_len).collect();
    match prefix.rfind(' ') {
        Some(cut) if cut > 0 => format!("{}...", &prefix[..cut]),
        _ => format!("{}...", prefix),
    }
}
