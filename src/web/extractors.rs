use crate::models::User;
use crate::services::auth;
use crate::web::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "session";

/// A signed-in user; anonymous requests are sent to the login page.
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Response;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let state = state.clone();
        let headers = parts.headers.clone();
        Box::pin(async move {
            let cookies = CookieJar::from_headers(&headers);
            let token = cookies
                .get(SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .ok_or_else(|| Redirect::to("/admin/login").into_response())?;

            let user = auth::validate_session(&state.db, &token)
                .map_err(|e| {
                    tracing::error!("Session lookup failed: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                })?
                .ok_or_else(|| Redirect::to("/admin/login").into_response())?;

            Ok(CurrentUser(user))
        })
    }
}

/// A signed-in user the server allows to manage posts.
pub struct PostEditor(pub User);

impl FromRequestParts<Arc<AppState>> for PostEditor {
    type Rejection = Response;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

            if !auth::can_manage_posts(&user, &state.config.auth) {
                tracing::warn!("Denied post management to '{}'", user.email);
                return Err((StatusCode::FORBIDDEN, "Admin access required").into_response());
            }

            Ok(PostEditor(user))
        })
    }
}

pub struct HxRequest(pub bool);

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let is_htmx = parts.headers.get("HX-Request").is_some();
        Box::pin(async move { Ok(HxRequest(is_htmx)) })
    }
}
