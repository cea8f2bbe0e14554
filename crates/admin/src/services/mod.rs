//! Admin services: authentication and image hosting.

pub mod auth;
pub mod images;

pub use auth::{ADMIN_COOKIE, login_cookie, logout_cookie, token_from_cookie_header, verify_password};
pub use images::{ImageHostClient, UploadError};
