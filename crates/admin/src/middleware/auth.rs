//! Authentication guard for admin routes.
//!
//! The admin token travels in an HTTP-only cookie. The guard is an extractor:
//! HTML routes reject to a login redirect, `/api/` routes reject with a 401
//! JSON body.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::COOKIE, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use secrecy::ExposeSecret;

use marigold_core::token::{self, Claims};

use crate::error::json_error;
use crate::services::auth::token_from_cookie_header;
use crate::state::AppState;

/// Extractor that requires a valid admin token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(claims): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.sub)
/// }
/// ```
pub struct RequireAdminAuth(pub Claims);

/// Error returned when the admin token is missing, expired, or forged.
pub enum AdminAuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// 401 with a JSON body (for API requests).
    Unauthorized,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => {
                json_error(StatusCode::UNAUTHORIZED, "authentication required")
            }
        }
    }
}

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        verified_claims(parts, state).ok_or_else(|| {
            if parts.uri.path().starts_with("/api/") {
                AdminAuthRejection::Unauthorized
            } else {
                AdminAuthRejection::RedirectToLogin
            }
        })
        .map(Self)
    }
}

/// Extractor that optionally reads the admin token.
///
/// Unlike `RequireAdminAuth`, this never rejects; the login page uses it to
/// bounce already-authenticated admins to the dashboard.
pub struct OptionalAdminAuth(pub Option<Claims>);

impl FromRequestParts<AppState> for OptionalAdminAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(verified_claims(parts, state)))
    }
}

/// Verify the cookie-borne token and return its claims, if any.
fn verified_claims(parts: &Parts, state: &AppState) -> Option<Claims> {
    let header = parts.headers.get(COOKIE)?.to_str().ok()?;
    let raw = token_from_cookie_header(header)?;
    let secret = state.config().token_secret.expose_secret().as_bytes();
    token::verify(secret, raw, Utc::now()).ok()
}
