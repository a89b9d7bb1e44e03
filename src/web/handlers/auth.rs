use crate::models::UserRole;
use crate::services::auth;
use crate::web::error::AppResult;
use crate::web::extractors::SESSION_COOKIE;
use crate::web::state::AppState;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use time::Duration;

fn session_cookie(token: String, lifetime_days: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::days(lifetime_days))
        .build()
}

fn render_with_error(
    state: &AppState,
    template: &str,
    status: StatusCode,
    error: &str,
) -> AppResult<Response> {
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("error", error);
    let html = state.templates.render(template, &ctx)?;
    Ok((status, Html(html)).into_response())
}

pub async fn login_form(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    if !auth::has_users(&state.db)? {
        return Ok(Redirect::to("/admin/setup").into_response());
    }

    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    let html = state.templates.render("admin/login.html", &ctx)?;
    Ok(Html(html).into_response())
}

#[derive(Deserialize)]
pub struct LoginForm {
    login: String,
    password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let client = addr.ip().to_string();

    if form.login.trim().is_empty() || form.password.is_empty() {
        return render_with_error(
            &state,
            "admin/login.html",
            StatusCode::BAD_REQUEST,
            "Please fill in all fields",
        );
    }

    if !state.rate_limiter.check(&client) {
        tracing::warn!("Login rate limit hit for {}", client);
        return render_with_error(
            &state,
            "admin/login.html",
            StatusCode::TOO_MANY_REQUESTS,
            "Too many failed login attempts. Try again later.",
        );
    }

    match auth::authenticate(&state.db, form.login.trim(), &form.password)? {
        Some(user) => {
            state.rate_limiter.clear(&client);
            let lifetime = state.config.auth.session_lifetime_days;
            let token = auth::create_session(&state.db, user.id, lifetime)?;
            tracing::info!("User '{}' signed in", user.username);

            Ok((jar.add(session_cookie(token, lifetime)), Redirect::to("/admin")).into_response())
        }
        None => {
            state.rate_limiter.record_attempt(&client);
            tracing::info!("Failed login for '{}' from {}", form.login.trim(), client);
            render_with_error(
                &state,
                "admin/login.html",
                StatusCode::UNAUTHORIZED,
                "Invalid username, email or password",
            )
        }
    }
}

pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(e) = auth::delete_session(&state.db, cookie.value()) {
            tracing::warn!("Failed to delete session: {}", e);
        }
    }

    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build();

    Ok((jar.remove(cookie), Redirect::to("/admin/login")).into_response())
}

pub async fn setup_form(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    if auth::has_users(&state.db)? {
        return Ok(Redirect::to("/admin/login").into_response());
    }

    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    let html = state.templates.render("admin/setup.html", &ctx)?;
    Ok(Html(html).into_response())
}

#[derive(Deserialize)]
pub struct SetupForm {
    username: String,
    email: String,
    password: String,
    password_confirm: String,
}

pub async fn setup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SetupForm>,
) -> AppResult<Response> {
    if auth::has_users(&state.db)? {
        return Ok(Redirect::to("/admin/login").into_response());
    }

    if form.password != form.password_confirm {
        return render_with_error(
            &state,
            "admin/setup.html",
            StatusCode::BAD_REQUEST,
            "Passwords do not match",
        );
    }

    let user_id = match auth::create_user(
        &state.db,
        &form.username,
        &form.email,
        &form.password,
        UserRole::Admin,
    ) {
        Ok(id) => id,
        Err(e) => {
            return render_with_error(
                &state,
                "admin/setup.html",
                StatusCode::BAD_REQUEST,
                &e.to_string(),
            )
        }
    };

    let lifetime = state.config.auth.session_lifetime_days;
    let token = auth::create_session(&state.db, user_id, lifetime)?;
    tracing::info!("Initial admin '{}' created", form.username);

    Ok((jar.add(session_cookie(token, lifetime)), Redirect::to("/admin")).into_response())
}
