use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const UNTITLED_POST: &str = "Untitled Post";

/// A blog post as served by the remote content API. The API owns the entity;
/// nothing here is persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Post {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub cover_link: Option<String>,
}

impl Post {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => UNTITLED_POST,
        }
    }

    pub fn author<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.created_by.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => fallback,
        }
    }

    /// Cover image URL; the API reports a missing cover as either an absent
    /// field or an empty string.
    pub fn cover(&self) -> Option<&str> {
        self.cover_link.as_deref().filter(|c| !c.is_empty())
    }

    /// Creation timestamp parsed into UTC, when the API sent one and it is
    /// well formed.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        parse_timestamp(raw)
    }
}

/// The API emits RFC 3339 timestamps, but older rows carry naive or date-only
/// strings; accept all three.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// The post identifier is opaque to this front-end; the API has served it both
/// as a JSON string and as a number.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => Ok(s),
        Some(Raw::Number(n)) => Ok(n.to_string()),
        None => Ok(String::new()),
    }
}

/// Payload for creating a post through the authenticated API endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub created_by: String,
    pub cover_link: String,
}

/// The listing endpoint answers either an envelope with an optional running
/// total or a bare array. Decoded once at the client boundary; everything
/// past it sees a [`PostPage`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Envelope {
        #[serde(default)]
        data: Vec<Post>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<Post>),
}

impl ListResponse {
    pub fn into_page(self) -> PostPage {
        match self {
            ListResponse::Envelope { data, total } => PostPage { posts: data, total },
            ListResponse::Bare(posts) => PostPage { posts, total: None },
        }
    }
}

/// One fetched page of the listing.
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: Option<u64>,
}

/// Single-post responses arrive wrapped: `{ "data": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct PostEnvelope {
    pub data: Post,
}
