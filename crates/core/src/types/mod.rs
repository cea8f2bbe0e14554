//! Core types for Marigold Threads.
//!
//! This module provides the catalog document and the small wrappers the rest
//! of the workspace passes around.

pub mod id;
pub mod money;
pub mod product;

pub use id::{LineId, ProductId};
pub use money::{format_inr, format_plain};
pub use product::{CATEGORIES, Product};
