//! Marigold Threads admin panel library.
//!
//! Exposes the admin modules so the CLI can reuse the validation rules and
//! repository for seeding. The binary entry point lives in `main.rs`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
