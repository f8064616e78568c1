//! Core types for DigitalMarket.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use category::{Category, CategoryParseError};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::Product;
pub use user::User;
