use crate::models::PostSummary;
use crate::services::posts;
use crate::web::handlers::{paginate, PaginationParams};
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use std::sync::Arc;

const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 50;

fn json_envelope(data: serde_json::Value, total: i64, page: usize, per_page: usize) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "data": data,
        "meta": {
            "total": total,
            "page": page,
            "per_page": per_page,
        }
    }))
}

fn paged_response<T: Serialize>(
    context: &str,
    items: &T,
    total: i64,
    page: usize,
    per_page: usize,
) -> Response {
    match serde_json::to_value(items) {
        Ok(data) => json_envelope(data, total, page, per_page).into_response(),
        Err(e) => internal_error(context, e.into()),
    }
}

fn not_found(msg: &str) -> Response {
    let body = serde_json::json!({
        "error": "Not Found",
        "message": msg,
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

fn internal_error(context: &str, err: anyhow::Error) -> Response {
    tracing::error!("API {} error: {}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "Internal server error"})),
    )
        .into_response()
}

/// GET /api/posts
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Response {
    let (page, per_page, offset) =
        paginate(params.page, params.per_page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);

    let listed = posts::list_posts(&state.db, per_page, offset)
        .and_then(|p| Ok((p, posts::count_posts(&state.db)?)));

    match listed {
        Ok((page_posts, total)) => {
            let summaries: Vec<PostSummary> = page_posts.iter().map(PostSummary::from).collect();
            paged_response("list_posts", &summaries, total, page, per_page)
        }
        Err(e) => internal_error("list_posts", e),
    }
}

/// GET /api/posts/:slug
///
/// Each successful read counts as a view.
pub async fn get_post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    match posts::record_view(&state.db, &slug) {
        Ok(true) => {}
        Ok(false) => return not_found("Post not found"),
        Err(e) => return internal_error("record_view", e),
    }

    match posts::get_post_by_slug(&state.db, &slug) {
        Ok(Some(post)) => {
            let keywords = post.keyword_list();
            Json(serde_json::json!({
                "data": post,
                "keywords": keywords,
            }))
            .into_response()
        }
        Ok(None) => not_found("Post not found"),
        Err(e) => internal_error("get_post", e),
    }
}
