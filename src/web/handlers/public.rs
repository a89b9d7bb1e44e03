use crate::services::feed;
use crate::web::error::AppResult;
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

pub async fn rss_feed(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let posts = feed::latest_posts(&state.db, &state.config.feed)?;
    let xml = feed::render_rss(
        &state.config.site,
        &state.config.feed,
        &posts,
        chrono::Utc::now(),
    )?;

    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        xml,
    )
        .into_response())
}

pub async fn atom_feed(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let posts = feed::latest_posts(&state.db, &state.config.feed)?;
    let xml = feed::render_atom(
        &state.config.site,
        &state.config.feed,
        &posts,
        chrono::Utc::now(),
    )?;

    Ok((
        [(header::CONTENT_TYPE, "application/atom+xml; charset=utf-8")],
        xml,
    )
        .into_response())
}

pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.db.get() {
        Ok(_) => "ok".into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                "database unavailable",
            )
                .into_response()
        }
    }
}
