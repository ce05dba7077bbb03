use crate::api::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(api) = self.0.downcast_ref::<ApiError>() {
            tracing::error!("Content API error: {:?}", api);
            return (StatusCode::BAD_GATEWAY, "Upstream content API error").into_response();
        }
        tracing::error!("Application error: {:?}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
