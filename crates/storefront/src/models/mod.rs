//! Request-scoped models for the storefront.

pub mod session;

pub use session::{NavBadges, SessionStash};
