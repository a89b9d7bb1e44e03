use crate::models::{PostInput, PostSummary, User};
use crate::services::{auth, posts};
use crate::web::error::{AppError, AppResult};
use crate::web::extractors::{HxRequest, PostEditor};
use crate::web::handlers::htmx::SeoPanel;
use crate::web::handlers::{page_count, paginate, PaginationParams};
use crate::web::state::AppState;
use crate::Database;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Serialize;
use std::sync::Arc;
use tera::Context;

fn make_admin_context(state: &AppState, user: &User) -> Context {
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("user", user);
    ctx.insert("is_admin", &auth::is_admin(user, &state.config.auth));
    ctx.insert("version", env!("CARGO_PKG_VERSION"));
    ctx
}

fn category_choices(state: &AppState) -> anyhow::Result<Vec<String>> {
    if state.config.content.categories.is_empty() {
        posts::used_categories(&state.db)
    } else {
        Ok(state.config.content.categories.clone())
    }
}

struct PostFormView<'a> {
    post_id: Option<i64>,
    input: &'a PostInput,
    error: Option<String>,
}

fn render_post_form(
    state: &AppState,
    user: &User,
    view: PostFormView<'_>,
    status: StatusCode,
) -> AppResult<Response> {
    let mut ctx = make_admin_context(state, user);
    ctx.insert("post", view.input);
    ctx.insert("post_id", &view.post_id);
    ctx.insert("is_new", &view.post_id.is_none());
    ctx.insert("categories", &category_choices(state)?);
    ctx.insert("seo", &SeoPanel::for_input(view.input));
    ctx.insert("error", &view.error);

    let html = state.templates.render("admin/posts/form.html", &ctx)?;
    Ok((status, Html(html)).into_response())
}

/// Client-side mistakes go back to the editor with the submitted values.
fn form_error_or_fail(
    state: &AppState,
    user: &User,
    post_id: Option<i64>,
    input: &PostInput,
    err: anyhow::Error,
) -> AppResult<Response> {
    let err = AppError::from(err);
    match err.client_status() {
        Some(status) => render_post_form(
            state,
            user,
            PostFormView {
                post_id,
                input,
                error: Some(err.message()),
            },
            status,
        ),
        None => Err(err),
    }
}

const ADMIN_PAGE_SIZE: usize = 25;
const ADMIN_MAX_PAGE_SIZE: usize = 100;

/// One page of the admin post list with its navigation links.
#[derive(Debug, Serialize)]
struct PostPage {
    posts: Vec<PostSummary>,
    total: i64,
    page: usize,
    per_page: usize,
    total_pages: usize,
    prev_page: Option<usize>,
    next_page: Option<usize>,
}

fn load_post_page(db: &Database, params: &PaginationParams) -> anyhow::Result<PostPage> {
    let (page, per_page, offset) =
        paginate(params.page, params.per_page, ADMIN_PAGE_SIZE, ADMIN_MAX_PAGE_SIZE);
    let total = posts::count_posts(db)?;
    let listed = posts::list_posts(db, per_page, offset)?;
    let total_pages = page_count(total, per_page);

    Ok(PostPage {
        posts: listed.iter().map(PostSummary::from).collect(),
        total,
        page,
        per_page,
        total_pages,
        prev_page: (page > 1).then(|| (page - 1).min(total_pages)),
        next_page: (page < total_pages).then_some(page + 1),
    })
}

pub async fn posts(
    State(state): State<Arc<AppState>>,
    PostEditor(user): PostEditor,
    Query(params): Query<PaginationParams>,
) -> AppResult<Html<String>> {
    let listing = load_post_page(&state.db, &params)?;

    let mut ctx = make_admin_context(&state, &user);
    ctx.insert("listing", &listing);

    let html = state.templates.render("admin/posts/index.html", &ctx)?;
    Ok(Html(html))
}

pub async fn new_post(
    State(state): State<Arc<AppState>>,
    PostEditor(user): PostEditor,
) -> AppResult<Response> {
    let input = PostInput::default();
    render_post_form(
        &state,
        &user,
        PostFormView {
            post_id: None,
            input: &input,
            error: None,
        },
        StatusCode::OK,
    )
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    PostEditor(user): PostEditor,
    Form(input): Form<PostInput>,
) -> AppResult<Response> {
    match posts::create_post(&state.db, input.clone(), &state.config.content) {
        Ok(id) => {
            tracing::info!("'{}' created post {}", user.username, id);
            Ok(Redirect::to("/admin").into_response())
        }
        Err(e) => form_error_or_fail(&state, &user, None, &input, e),
    }
}

pub async fn edit_post(
    State(state): State<Arc<AppState>>,
    PostEditor(user): PostEditor,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let post = match posts::get_post(&state.db, id)? {
        Some(p) => p,
        None => return Ok((StatusCode::NOT_FOUND, "Post not found").into_response()),
    };

    let input = PostInput::from(&post);
    render_post_form(
        &state,
        &user,
        PostFormView {
            post_id: Some(id),
            input: &input,
            error: None,
        },
        StatusCode::OK,
    )
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    PostEditor(user): PostEditor,
    Path(id): Path<i64>,
    Form(input): Form<PostInput>,
) -> AppResult<Response> {
    match posts::update_post(&state.db, id, input.clone(), &state.config.content) {
        Ok(()) => {
            tracing::info!("'{}' updated post {}", user.username, id);
            Ok(Redirect::to("/admin").into_response())
        }
        Err(e) => form_error_or_fail(&state, &user, Some(id), &input, e),
    }
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    PostEditor(user): PostEditor,
    HxRequest(is_htmx): HxRequest,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    posts::delete_post(&state.db, id)?;
    tracing::info!("'{}' deleted post {}", user.username, id);

    if is_htmx {
        Ok((
            [(
                header::HeaderName::from_static("hx-redirect"),
                "/admin".to_string(),
            )],
            "",
        )
            .into_response())
    } else {
        Ok(Redirect::to("/admin").into_response())
    }
}
