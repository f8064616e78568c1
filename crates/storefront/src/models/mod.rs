//! Value types owned by the storefront aggregates.
//!
//! These are the shapes written to durable slots and passed to the order
//! service; the aggregates in [`crate::cart`] and [`crate::checkout`] own the
//! rules for changing them.

mod cart;
mod order;

pub use cart::{CartLine, CartLines, DuplicateLine};
pub use order::{Confirmation, OrderLine, OrderReceipt};
