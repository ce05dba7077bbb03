//! Client for the external auth provider. Credentials are exchanged for a
//! session token; the token itself is opaque here and only replayed to the
//! content API as a bearer credential.

use crate::config::AuthConfig;
use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("auth provider is not configured")]
    NotConfigured,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("auth provider answered {0}")]
    Status(StatusCode),
    #[error("auth provider request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A session issued by the auth provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base: Option<Url>,
    public_key: String,
}

impl AuthClient {
    pub fn new(config: &AuthConfig, timeout_secs: u64) -> Result<Self> {
        let base = if config.url.is_empty() {
            None
        } else {
            let mut raw = config.url.trim_end_matches('/').to_string();
            raw.push('/');
            Some(
                Url::parse(&raw)
                    .map_err(|e| anyhow::anyhow!("Invalid auth.url '{}': {}", config.url, e))?,
            )
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("driftwood/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base,
            public_key: config.public_key.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.base.is_some()
    }

    /// Password-credential sign-in. The provider answers 400/401/422 for bad
    /// credentials; anything else non-success is a provider fault.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let base = self.base.as_ref().ok_or(AuthError::NotConfigured)?;
        let url = base
            .join("auth/v1/token")
            .map_err(|_| AuthError::NotConfigured)?;

        let res = self
            .http
            .post(url)
            .query(&[("grant_type", "password")])
            .header("apikey", &self.public_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        match res.status() {
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::UNPROCESSABLE_ENTITY => Err(AuthError::InvalidCredentials),
            s if !s.is_success() => Err(AuthError::Status(s)),
            _ => Ok(res.json::<Session>().await?),
        }
    }
}
