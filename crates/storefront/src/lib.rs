//! DigitalMarket storefront library.
//!
//! Everything behind the shopper-facing front end of a digital goods store:
//! product catalog, accounts, cart, session and checkout. All "backend"
//! calls are simulated in-process with artificial latency.
//!
//! # Architecture
//!
//! - [`db`] - Catalog and account stores, built once and injected
//! - [`services`] - Mock service layer (catalog queries, auth, orders)
//! - [`cart`] / [`session`] - Aggregates persisted to durable slots
//! - [`checkout`] - One-shot order workflow over the cart
//! - [`storage`] - Durable key/value slots (file or memory)
//! - [`navigation`] - Routes and post-login redirects
//!
//! [`Storefront`] wires these together from a [`StorefrontConfig`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod models;
pub mod navigation;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;

pub use cart::Cart;
pub use checkout::{Checkout, CheckoutError, CheckoutStep};
pub use config::{LatencyProfile, StorefrontConfig};
pub use error::{AppError, Result};
pub use navigation::Location;
pub use session::Session;
pub use state::Storefront;
