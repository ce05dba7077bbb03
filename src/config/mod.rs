use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// The remote content API this front-end renders from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_title")]
    pub title: String,
    /// Public base URL, used for canonical links in social metadata.
    #[serde(default = "default_site_url")]
    pub url: String,
    /// Byline shown when a post carries no author.
    #[serde(default = "default_author")]
    pub default_author: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            url: default_site_url(),
            default_author: default_author(),
        }
    }
}

/// The external auth provider the admin form exchanges credentials with.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub public_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentConfig {
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: usize,
    #[serde(default = "default_description_length")]
    pub description_length: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_per_page: default_posts_per_page(),
            description_length: default_description_length(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_site_title() -> String {
    "Driftwood".to_string()
}

fn default_site_url() -> String {
    "https://blog.example.com".to_string()
}

fn default_author() -> String {
    "Staff Writer".to_string()
}

fn default_posts_per_page() -> usize {
    9
}

fn default_description_length() -> usize {
    165
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist, then apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                anyhow::anyhow!("Could not read config file '{}': {}", path.display(), e)
            })?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Environment variables take precedence over the config file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("API_URL") {
            if !url.is_empty() {
                self.api.url = url;
            }
        }
        if let Ok(url) = std::env::var("SITE_URL") {
            if !url.is_empty() {
                self.site.url = url;
            }
        }
        if let Ok(url) = std::env::var("AUTH_URL") {
            if !url.is_empty() {
                self.auth.url = url;
            }
        }
        if let Ok(key) = std::env::var("AUTH_PUBLIC_KEY") {
            if !key.is_empty() {
                self.auth.public_key = key;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.url.is_empty() {
            anyhow::bail!("api.url must not be empty");
        }
        if self.site.url.is_empty() {
            anyhow::bail!("site.url must not be empty");
        }
        if self.content.posts_per_page == 0 {
            anyhow::bail!("content.posts_per_page must be greater than 0");
        }
        if self.content.posts_per_page > 100 {
            anyhow::bail!("content.posts_per_page must be 100 or less");
        }
        if self.content.description_length == 0 {
            anyhow::bail!("content.description_length must be greater than 0");
        }
        if self.content.description_length > 1000 {
            anyhow::bail!("content.description_length must be 1000 or less");
        }
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than 0");
        }
        Ok(())
    }
}
