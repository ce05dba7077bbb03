use crate::api::ApiError;
use crate::services::metadata::PageMetadata;
use crate::services::pagination;
use crate::web::error::AppResult;
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;

fn make_context(state: &AppState) -> Context {
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("meta", &Option::<PageMetadata>::None);
    ctx.insert("flash", &Vec::<String>::new());
    ctx
}

#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    page: usize,
}

fn default_page() -> usize {
    1
}

/// Home: hero card for the latest post plus the paginated grid. Both are
/// fetched fresh per request; a failed fetch degrades its own section and
/// leaves a notice, it never fails the page.
pub async fn home(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Response> {
    let per_page = state.config.content.posts_per_page;
    let page = pagination::clamp_page(pagination.page);
    let mut flash: Vec<String> = Vec::new();

    let hero = match state.api.latest_post().await {
        Ok(hero) => hero,
        Err(e) => {
            tracing::warn!("Failed to fetch latest post: {}", e);
            flash.push("Error getting latest blog".to_string());
            None
        }
    };

    // The grid asks for one extra row and drops the first, so the hero post
    // never reappears in the grid below it.
    let (posts, total_pages, listing_ok) = match state.api.list_posts(page, per_page + 1).await {
        Ok(fetched) => {
            let total = fetched.total;
            let mut posts = fetched.posts;
            if !posts.is_empty() {
                posts.remove(0);
            }
            // Without a reported total, a full page means at least one more
            // page may exist; a short page pins the count.
            let total_pages =
                pagination::derive_total_pages(page + 1, page, posts.len(), total, per_page, true);
            (posts, total_pages, true)
        }
        Err(e) => {
            tracing::warn!("Failed to fetch posts page {}: {}", page, e);
            flash.push("Error getting blogs".to_string());
            (Vec::new(), 1, false)
        }
    };

    // A page past the end would render an empty grid under controls marking
    // the last page current; send the visitor to the real last page instead.
    if listing_ok && page > total_pages {
        return Ok(Redirect::to(&format!("/?page={}", total_pages.max(1))).into_response());
    }

    let page = page.min(total_pages.max(1));
    let items = pagination::window_items(page, total_pages);

    let mut ctx = make_context(&state);
    ctx.insert("hero", &hero);
    ctx.insert("posts", &posts);
    ctx.insert("page", &page);
    ctx.insert("total_pages", &total_pages);
    ctx.insert("pagination", &items);
    ctx.insert("flash", &flash);

    let html = state.templates.render("public/index.html", &ctx)?;
    Ok(Html(html).into_response())
}

/// Single post by slug. Social metadata is resolved before render so the
/// tags are in the head of this response. Any upstream failure renders the
/// not-found view with the fallback metadata.
pub async fn post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    match state.api.fetch_post(&slug).await {
        Ok(post) => {
            let meta = PageMetadata::for_post(
                &post,
                &state.config.site,
                state.config.content.description_length,
            );
            let body_html = state.markdown.render(&post.content);

            let mut ctx = make_context(&state);
            ctx.insert("meta", &meta);
            ctx.insert("post", &post);
            ctx.insert("body_html", &body_html);

            let html = state.templates.render("public/post.html", &ctx)?;
            Ok(Html(html).into_response())
        }
        Err(ApiError::NotFound) => not_found(&state),
        Err(e) => {
            tracing::warn!("Failed to fetch post '{}': {}", slug, e);
            not_found(&state)
        }
    }
}

fn not_found(state: &AppState) -> AppResult<Response> {
    let mut ctx = make_context(state);
    ctx.insert("meta", &PageMetadata::not_found());

    let html = state.templates.render("public/404.html", &ctx)?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
