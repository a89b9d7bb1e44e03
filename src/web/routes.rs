use super::handlers;
use super::state::AppState;
use crate::services::feed::{ATOM_PATH, RSS_PATH};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(RSS_PATH, get(handlers::public::rss_feed))
        .route(ATOM_PATH, get(handlers::public::atom_feed))
        .route("/health", get(handlers::public::health))
        .route("/api/posts", get(handlers::api::list_posts))
        .route("/api/posts/:slug", get(handlers::api::get_post))
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/login", get(handlers::auth::login_form))
        .route("/admin/login", post(handlers::auth::login))
        .route("/admin/logout", post(handlers::auth::logout))
        .route("/admin/setup", get(handlers::auth::setup_form))
        .route("/admin/setup", post(handlers::auth::setup))
        .route("/admin", get(handlers::admin::posts))
        .route("/admin/posts", get(handlers::admin::posts))
        .route("/admin/posts/new", get(handlers::admin::new_post))
        .route("/admin/posts", post(handlers::admin::create_post))
        .route("/admin/posts/:id/edit", get(handlers::admin::edit_post))
        .route("/admin/posts/:id", post(handlers::admin::update_post))
        .route(
            "/admin/posts/:id/delete",
            post(handlers::admin::delete_post),
        )
}

pub fn htmx_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/htmx/slug", post(handlers::htmx::slug))
        .route("/htmx/seo", post(handlers::htmx::seo))
}
