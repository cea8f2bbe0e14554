//! Authentication route handlers.
//!
//! One shared password, exchanged for a signed token in an HTTP-only cookie.
//! The login POST sits behind the rate limiter.

use askama::Template;
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, Html, IntoResponse, Redirect},
    routing::{get, post},
};
use chrono::Utc;
use secrecy::ExposeSecret;
use serde::Deserialize;

use marigold_core::token;

use crate::error::{AppError, Result};
use crate::middleware::{OptionalAdminAuth, login_rate_limiter};
use crate::services::auth::{login_cookie, logout_cookie, verify_password};
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    error: Option<&'static str>,
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route_layer(login_rate_limiter())
        .route("/auth/logout", post(logout))
}

/// Render the login page; admins with a valid cookie go straight home.
///
/// GET /auth/login
async fn login_page(OptionalAdminAuth(claims): OptionalAdminAuth) -> impl IntoResponse {
    if claims.is_some() {
        return Redirect::to("/").into_response();
    }
    render_login(None).into_response()
}

/// Verify the password and set the token cookie.
///
/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    axum::extract::Form(form): axum::extract::Form<LoginForm>,
) -> Result<axum::response::Response> {
    if !verify_password(&state.config().password, &form.password) {
        tracing::warn!("admin login failed");
        return Ok((StatusCode::UNAUTHORIZED, render_login(Some("Wrong password"))).into_response());
    }

    let secret = state.config().token_secret.expose_secret().as_bytes();
    let token = token::mint(secret, "admin", Utc::now())
        .map_err(|e| AppError::Internal(format!("token mint failed: {e}")))?;

    tracing::info!("admin logged in");
    let cookie = login_cookie(&token, state.config().is_https());
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/")).into_response())
}

/// Clear the token cookie.
///
/// POST /auth/logout
async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = logout_cookie(state.config().is_https());
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to("/auth/login"),
    )
}

fn render_login(error: Option<&'static str>) -> Html<String> {
    Html(
        LoginPageTemplate { error }
            .render()
            .unwrap_or_else(|_| String::from("Error rendering template")),
    )
}
