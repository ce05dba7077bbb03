use crate::api::ApiClient;
use crate::services::auth::AuthClient;
use crate::services::markdown::MarkdownRenderer;
use crate::Config;
use anyhow::Result;
use std::collections::HashMap;
use tera::{Tera, Value};

pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub auth: AuthClient,
    pub templates: Tera,
    pub markdown: MarkdownRenderer,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let auth = AuthClient::new(&config.auth, config.api.timeout_secs)?;

        let mut templates = Tera::default();
        templates.register_filter("format_date", format_date_filter);
        templates.register_filter("first_words", first_words_filter);
        templates.add_raw_templates(vec![
            ("css/bundle.css", include_str!("../../templates/css/bundle.css")),
            ("base.html", include_str!("../../templates/base.html")),
            (
                "public/index.html",
                include_str!("../../templates/public/index.html"),
            ),
            (
                "public/post.html",
                include_str!("../../templates/public/post.html"),
            ),
            (
                "public/404.html",
                include_str!("../../templates/public/404.html"),
            ),
            (
                "admin/login.html",
                include_str!("../../templates/admin/login.html"),
            ),
            (
                "admin/compose.html",
                include_str!("../../templates/admin/compose.html"),
            ),
        ])?;

        Ok(Self {
            config,
            api,
            auth,
            templates,
            markdown: MarkdownRenderer::new(),
        })
    }
}

/// Renders an upstream timestamp for display. The API mostly emits RFC 3339,
/// with naive strings on older rows; anything unparseable passes through.
fn format_date_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let date_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("format_date requires a string"))?;

    let format = args
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("%b %-d, %Y");

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date_str) {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    Ok(Value::String(date_str.to_string()))
}

/// Teaser text for the hero card: the first `count` words, with an ellipsis
/// when the body continues past them.
fn first_words_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("first_words requires a string"))?;
    let count = args.get("count").and_then(|v| v.as_u64()).unwrap_or(15) as usize;

    let words: Vec<&str> = text.split_whitespace().collect();
    let mut teaser = words.iter().take(count).copied().collect::<Vec<_>>().join(" ");
    if words.len() > count {
        teaser.push('…');
    }
    Ok(Value::String(teaser))
}
