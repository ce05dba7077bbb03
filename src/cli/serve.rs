use crate::{web, Config};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, host: Option<&str>, port: Option<u16>) -> Result<()> {
    let config = Config::load(config_path)?;

    let host = host.unwrap_or(&config.server.host).to_string();
    let port = port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);

    tracing::info!("Rendering from content API at {}", config.api.url);
    tracing::info!("Starting server at http://{}", addr);

    web::serve(config, &addr).await?;

    Ok(())
}
