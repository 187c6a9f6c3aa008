//! Shopfront Core - Shared domain types.
//!
//! This crate provides the types used across all Shopfront components:
//! - `storefront` - Client library for the storefront REST API
//! - `cli` - Terminal front end driving the storefront pages
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! The REST API owns every entity; these types only describe what it sends
//! back and what the client is allowed to send.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, roles and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
