use super::handlers;
use super::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::public::home))
        .route("/:slug", get(handlers::public::post))
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin", get(handlers::admin::compose))
        .route("/admin/login", post(handlers::auth::login))
        .route("/admin/logout", post(handlers::auth::logout))
        .route("/admin/posts", post(handlers::admin::create_post))
}
