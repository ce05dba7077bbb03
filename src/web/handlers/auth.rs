use crate::services::auth::AuthError;
use crate::web::error::AppResult;
use crate::web::extractors::SESSION_COOKIE;
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;
use time::Duration;

const DEFAULT_SESSION_DAYS: i64 = 7;

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

fn login_page(state: &AppState, email: &str, error: &str, status: StatusCode) -> AppResult<Response> {
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("meta", &Option::<()>::None);
    ctx.insert("flash", &Vec::<String>::new());
    ctx.insert("email", email);
    ctx.insert("error", error);

    let html = state.templates.render("admin/login.html", &ctx)?;
    Ok((status, Html(html)).into_response())
}

/// Exchange credentials for a session at the external auth provider and
/// store the access token in the session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if form.email.trim().is_empty() || form.password.trim().is_empty() {
        return login_page(
            &state,
            &form.email,
            "Please enter both email and password",
            StatusCode::BAD_REQUEST,
        );
    }

    match state.auth.sign_in(&form.email, &form.password).await {
        Ok(session) => {
            let max_age = session
                .expires_in
                .map(|secs| Duration::seconds(secs as i64))
                .unwrap_or_else(|| Duration::days(DEFAULT_SESSION_DAYS));
            let cookie = Cookie::build((SESSION_COOKIE, session.access_token))
                .path("/")
                .http_only(true)
                .max_age(max_age)
                .build();

            Ok((jar.add(cookie), Redirect::to("/admin")).into_response())
        }
        Err(AuthError::InvalidCredentials) => login_page(
            &state,
            &form.email,
            "Login failed: invalid email or password",
            StatusCode::UNAUTHORIZED,
        ),
        Err(e) => {
            tracing::error!("Sign-in against auth provider failed: {}", e);
            login_page(
                &state,
                &form.email,
                "An unexpected error occurred",
                StatusCode::BAD_GATEWAY,
            )
        }
    }
}

pub async fn logout(jar: CookieJar) -> Response {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build();

    (jar.remove(cookie), Redirect::to("/admin")).into_response()
}
