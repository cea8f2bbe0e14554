//! Password verification and the admin token cookie.
//!
//! Token mint/verify live in `marigold_core::token`; this module owns the
//! parts that are HTTP-shaped: the constant-time password check and the
//! `Set-Cookie` values.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use marigold_core::token::TOKEN_TTL_SECONDS;

/// Name of the cookie the admin token travels in.
pub const ADMIN_COOKIE: &str = "admin_token";

/// Compare a login attempt against the configured password.
///
/// Both sides are hashed to SHA-256 first so the comparison runs over
/// fixed-length digests, then compared without early exit. Timing reveals
/// nothing about where the attempt diverges.
#[must_use]
pub fn verify_password(configured: &SecretString, attempt: &str) -> bool {
    let expected = Sha256::digest(configured.expose_secret().as_bytes());
    let received = Sha256::digest(attempt.as_bytes());

    expected
        .iter()
        .zip(received.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// The `Set-Cookie` value for a successful login.
///
/// `Max-Age` matches the token's own TTL so the cookie and the signature
/// expire together. `Secure` follows the configured base URL scheme.
#[must_use]
pub fn login_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{ADMIN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={TOKEN_TTL_SECONDS}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// The `Set-Cookie` value that logs the admin out: same attributes, empty
/// value, immediate expiry.
#[must_use]
pub fn logout_cookie(secure: bool) -> String {
    let mut cookie = format!("{ADMIN_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Pull the admin token out of a `Cookie` request header value.
#[must_use]
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == ADMIN_COOKIE && !value.is_empty()).then_some(value)
    })
}
