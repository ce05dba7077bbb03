mod error;
mod extractors;
mod handlers;
mod routes;
pub mod security;
mod state;

pub use state::AppState;

use crate::Config;
use anyhow::Result;
use axum::middleware;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// The full application router. Split from [`serve`] so tests can drive it
/// without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::public_routes())
        .merge(routes::admin_routes())
        .layer(middleware::from_fn(security::apply_security_headers))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config, addr: &str) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
