//! Shopfront storefront client library.
//!
//! Everything a storefront front end needs short of drawing pixels: the REST
//! API adapter, the persisted session and local cart, route guards, the
//! catalog filter, and one workflow per page. The terminal front end in
//! `shopfront-cli` is a thin layer over this crate.
//!
//! Start from [`state::AppContext`]:
//!
//! ```rust,ignore
//! let config = StorefrontConfig::from_env()?;
//! let mut ctx = AppContext::open(config)?;
//! let landed = ctx.navigate(Route::Products)?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod guards;
pub mod models;
pub mod pages;
pub mod session;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use guards::Route;
pub use state::AppContext;
