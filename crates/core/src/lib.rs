//! Marigold Core - shared domain library.
//!
//! This crate holds the domain logic shared by the Marigold Threads services:
//! - `storefront` - public shop (cart, wishlist, listing, WhatsApp checkout)
//! - `admin` - catalog management panel
//! - `cli` - migrations and seeding
//!
//! # Architecture
//!
//! The crate performs no database access and no HTTP. Its only side effect is
//! writing through an injected key-value port ([`storage::KeyValueStorage`]),
//! which the cart and wishlist persist their snapshots through. That keeps
//! every container here runnable under a web session, an in-memory test
//! store, or a plain tool, with identical behavior.
//!
//! # Modules
//!
//! - [`types`] - IDs, catalog documents, rupee formatting
//! - [`storage`] - key-value persistence port and the in-memory store
//! - [`cart`] - shopping cart container
//! - [`wishlist`] - wishlist container
//! - [`listing`] - catalog filter and sort pipeline
//! - [`checkout`] - WhatsApp order handoff messages
//! - [`token`] - signed admin session tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod listing;
pub mod storage;
pub mod token;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartLine};
pub use types::*;
pub use wishlist::Wishlist;
