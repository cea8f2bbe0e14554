//! Admin HTTP middleware: auth guard, request ids, security headers, login
//! rate limiting.

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use auth::{OptionalAdminAuth, RequireAdminAuth};
pub use rate_limit::login_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
