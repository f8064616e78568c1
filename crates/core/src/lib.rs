//! DigitalMarket Core - Shared domain types.
//!
//! This crate provides the types shared by every DigitalMarket component:
//! - `storefront` - Catalog, accounts, cart, session and checkout logic
//! - `cli` - Command-line front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage,
//! no simulated services. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, categories, products and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
