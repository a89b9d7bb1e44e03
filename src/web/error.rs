use crate::services::posts::PostError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub struct AppError(anyhow::Error);

impl AppError {
    /// Status for errors the client can act on; `None` means a server fault.
    pub fn client_status(&self) -> Option<StatusCode> {
        match self.0.downcast_ref::<PostError>()? {
            PostError::Validation(_) => Some(StatusCode::BAD_REQUEST),
            PostError::DuplicateSlug(_) => Some(StatusCode::CONFLICT),
            PostError::NotFound => Some(StatusCode::NOT_FOUND),
        }
    }

    pub fn message(&self) -> String {
        self.0.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(status) = self.client_status() {
            return (status, self.message()).into_response();
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
