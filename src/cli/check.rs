use crate::api::ApiClient;
use crate::services::auth::AuthClient;
use crate::Config;
use anyhow::Result;
use std::path::Path;

#[derive(Debug)]
enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "\x1b[32m✓ OK\x1b[0m"),
            CheckStatus::Warn => write!(f, "\x1b[33m⚠ WARN\x1b[0m"),
            CheckStatus::Fail => write!(f, "\x1b[31m✗ FAIL\x1b[0m"),
        }
    }
}

struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

/// `driftwood check` verifies the configuration, the content API, and the
/// auth provider setup without starting the server.
pub async fn run(config_path: &Path) -> Result<()> {
    println!("\n  Driftwood Upstream Health Check\n");

    let mut results: Vec<CheckResult> = Vec::new();
    let mut has_failure = false;

    let config = match Config::load(config_path) {
        Ok(c) => {
            results.push(CheckResult {
                name: "Configuration".into(),
                status: CheckStatus::Ok,
                detail: if config_path.exists() {
                    format!("Loaded from {}", config_path.display())
                } else {
                    "No config file; defaults and environment in effect".into()
                },
            });
            Some(c)
        }
        Err(e) => {
            results.push(CheckResult {
                name: "Configuration".into(),
                status: CheckStatus::Fail,
                detail: e.to_string(),
            });
            has_failure = true;
            None
        }
    };

    if let Some(config) = &config {
        match ApiClient::new(&config.api) {
            Ok(api) => match api.list_posts(1, 1).await {
                Ok(page) => {
                    let detail = match page.total {
                        Some(total) => format!("{} reachable, {} posts", config.api.url, total),
                        None => format!("{} reachable", config.api.url),
                    };
                    results.push(CheckResult {
                        name: "Content API".into(),
                        status: CheckStatus::Ok,
                        detail,
                    });
                }
                Err(e) => {
                    results.push(CheckResult {
                        name: "Content API".into(),
                        status: CheckStatus::Fail,
                        detail: format!("{}: {}", config.api.url, e),
                    });
                    has_failure = true;
                }
            },
            Err(e) => {
                results.push(CheckResult {
                    name: "Content API".into(),
                    status: CheckStatus::Fail,
                    detail: e.to_string(),
                });
                has_failure = true;
            }
        }

        match AuthClient::new(&config.auth, config.api.timeout_secs) {
            Ok(auth) if auth.is_configured() => {
                results.push(CheckResult {
                    name: "Auth provider".into(),
                    status: CheckStatus::Ok,
                    detail: config.auth.url.clone(),
                });
            }
            Ok(_) => {
                results.push(CheckResult {
                    name: "Auth provider".into(),
                    status: CheckStatus::Warn,
                    detail: "Not configured; admin login is unavailable".into(),
                });
            }
            Err(e) => {
                results.push(CheckResult {
                    name: "Auth provider".into(),
                    status: CheckStatus::Fail,
                    detail: e.to_string(),
                });
                has_failure = true;
            }
        }
    }

    for result in &results {
        println!("  {}  {:<16} {}", result.status, result.name, result.detail);
    }
    println!();

    if has_failure {
        anyhow::bail!("one or more checks failed");
    }
    Ok(())
}
