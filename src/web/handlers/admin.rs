use crate::api::ApiError;
use crate::models::NewPost;
use crate::services::tags::parse_tags;
use crate::web::error::AppResult;
use crate::web::extractors::{AdminSession, OptionalSession};
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;

#[derive(Deserialize, Default)]
pub struct ComposeForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub cover_link: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub content: String,
}

impl ComposeForm {
    fn has_required_fields(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.content.trim().is_empty()
            && !self.slug.trim().is_empty()
            && !self.author.trim().is_empty()
    }
}

fn compose_page(
    state: &AppState,
    form: &ComposeForm,
    error: Option<&str>,
    notice: Option<&str>,
    status: StatusCode,
) -> AppResult<Response> {
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("meta", &Option::<()>::None);
    ctx.insert("flash", &Vec::<String>::new());
    ctx.insert("form", &serde_json::json!({
        "title": form.title,
        "slug": form.slug,
        "author": form.author,
        "cover_link": form.cover_link,
        "tags": form.tags,
        "content": form.content,
    }));
    ctx.insert("tag_preview", &parse_tags(&form.tags));
    ctx.insert("error", &error);
    ctx.insert("notice", &notice);

    let html = state.templates.render("admin/compose.html", &ctx)?;
    Ok((status, Html(html)).into_response())
}

/// The admin gate: the login view without a session, the compose form with
/// one. Session validity is the content API's call, made on submission.
pub async fn compose(
    State(state): State<Arc<AppState>>,
    OptionalSession(session): OptionalSession,
) -> AppResult<Response> {
    if session.is_none() {
        let mut ctx = Context::new();
        ctx.insert("site", &state.config.site);
        ctx.insert("meta", &Option::<()>::None);
        ctx.insert("flash", &Vec::<String>::new());
        ctx.insert("email", "");
        ctx.insert("error", "");

        let html = state.templates.render("admin/login.html", &ctx)?;
        return Ok(Html(html).into_response());
    }

    compose_page(
        &state,
        &ComposeForm::default(),
        None,
        None,
        StatusCode::OK,
    )
}

/// Submit a new post to the content API with the session's bearer token.
/// Success clears the form; failure re-renders it with the draft intact.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AdminSession(token): AdminSession,
    Form(form): Form<ComposeForm>,
) -> AppResult<Response> {
    if !form.has_required_fields() {
        return compose_page(
            &state,
            &form,
            Some("Please fill in all required fields"),
            None,
            StatusCode::UNPROCESSABLE_ENTITY,
        );
    }

    let new_post = NewPost {
        title: form.title.clone(),
        content: form.content.clone(),
        slug: form.slug.clone(),
        tags: parse_tags(&form.tags),
        created_by: form.author.clone(),
        cover_link: form.cover_link.clone(),
    };

    match state.api.create_post(&token, &new_post).await {
        Ok(()) => compose_page(
            &state,
            &ComposeForm::default(),
            None,
            Some("Blog post created successfully!"),
            StatusCode::OK,
        ),
        Err(ApiError::Status(s))
            if s == StatusCode::UNAUTHORIZED || s == StatusCode::FORBIDDEN =>
        {
            compose_page(
                &state,
                &form,
                Some("Your session has expired. Log out and sign in again."),
                None,
                StatusCode::UNAUTHORIZED,
            )
        }
        Err(e) => {
            tracing::error!("Failed to create blog post: {}", e);
            compose_page(
                &state,
                &form,
                Some("Failed to create blog post"),
                None,
                StatusCode::BAD_GATEWAY,
            )
        }
    }
}
