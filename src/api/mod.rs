use crate::config::ApiConfig;
use crate::models::{ListResponse, NewPost, PostEnvelope, PostPage};
use anyhow::Result;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

/// Errors surfaced by the content API boundary. Handlers decide how each one
/// renders; nothing here panics or logs on its own.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("post not found")]
    NotFound,
    #[error("content API answered {0}")]
    Status(StatusCode),
    #[error("content API request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for the remote content API. This front-end has no storage of its
/// own; every view is rendered from fresh responses of this client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let mut raw = config.url.trim_end_matches('/').to_string();
        raw.push('/');
        let base = Url::parse(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid api.url '{}': {}", config.url, e))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("driftwood/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base })
    }

    /// `GET {base}/{slug}`: a single post, unwrapped from its envelope.
    /// The slug is percent-encoded into a single path segment.
    pub async fn fetch_post(&self, slug: &str) -> Result<crate::models::Post, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Status(StatusCode::BAD_REQUEST))?
            .pop_if_empty()
            .push(slug);

        let res = self.http.get(url).send().await?;
        match res.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            s if !s.is_success() => Err(ApiError::Status(s)),
            _ => Ok(res.json::<PostEnvelope>().await?.data),
        }
    }

    /// `GET {base}?page={n}&limit={m}`: one page of the listing. The two
    /// response shapes the API is known to produce are normalized here.
    pub async fn list_posts(&self, page: usize, limit: usize) -> Result<PostPage, ApiError> {
        let res = self
            .http
            .get(self.base.clone())
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(res.json::<ListResponse>().await?.into_page())
    }

    /// The most recent post, for the hero section.
    pub async fn latest_post(&self) -> Result<Option<crate::models::Post>, ApiError> {
        let page = self.list_posts(1, 1).await?;
        Ok(page.posts.into_iter().next())
    }

    /// `POST {base}` with a bearer token. The API reports success or failure
    /// by status only; the response body is not consulted.
    pub async fn create_post(&self, token: &str, post: &NewPost) -> Result<(), ApiError> {
        let res = self
            .http
            .post(self.base.clone())
            .bearer_auth(token)
            .json(post)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(())
    }
}
