use crate::web::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::CookieJar;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Cookie holding the auth provider's access token. The token is opaque to
/// this front-end; the content API rejects stale or forged ones on use.
pub const SESSION_COOKIE: &str = "session";

/// A bearer token for the admin endpoints. Absent session lands back on the
/// login view.
pub struct AdminSession(pub String);

impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = Redirect;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 Arc<AppState>,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let headers = parts.headers.clone();
        Box::pin(async move {
            let cookies = CookieJar::from_headers(&headers);
            let token = cookies
                .get(SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| Redirect::to("/admin"))?;

            Ok(AdminSession(token))
        })
    }
}

pub struct OptionalSession(pub Option<String>);

impl FromRequestParts<Arc<AppState>> for OptionalSession {
    type Rejection = Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 Arc<AppState>,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let headers = parts.headers.clone();
        Box::pin(async move {
            let cookies = CookieJar::from_headers(&headers);
            let token = cookies
                .get(SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .filter(|t| !t.is_empty());

            Ok(OptionalSession(token))
        })
    }
}
