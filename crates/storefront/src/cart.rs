//! Cart aggregate.
//!
//! The cart is an ordered list of [`CartLine`]s with at most one line per
//! product. Every mutation writes the whole cart to the `cart` slot before it
//! returns; totals are always computed from the current lines.

use tracing::{debug, instrument};

use digital_market_core::{Price, Product, ProductId};

use crate::models::{CartLine, CartLines, OrderLine};
use crate::storage::{DurableSlot, SharedStore, keys};

/// The shopper's cart, bound to its durable slot.
#[derive(Debug)]
pub struct Cart {
    lines: CartLines,
    slot: DurableSlot<CartLines>,
}

impl Cart {
    /// Load the cart from `store`.
    ///
    /// Missing or malformed content yields an empty cart.
    #[must_use]
    pub fn hydrate(store: SharedStore) -> Self {
        let slot: DurableSlot<CartLines> = DurableSlot::new(store, keys::CART);
        let lines = slot.load().unwrap_or_default();
        debug!(lines = lines.as_slice().len(), "Cart hydrated");
        Self { lines, slot }
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the same id gains one unit; otherwise a new line
    /// with quantity 1 is appended.
    #[instrument(skip_all, fields(product_id = %product.id))]
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.lines.find_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::single(product.clone()));
        }
        self.persist();
    }

    /// Drop the line for `id`. Absent ids are ignored.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove(&mut self, id: &ProductId) {
        if self.lines.remove(id) {
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.lines.as_slice()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines()
            .iter()
            .map(|l| u64::from(l.quantity.get()))
            .sum()
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines().iter().map(CartLine::subtotal).sum()
    }

    /// Quantity held for `id`, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.lines()
            .iter()
            .find(|l| &l.product.id == id)
            .map_or(0, |l| l.quantity.get())
    }

    /// Snapshot of the lines for order submission.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines().iter().map(OrderLine::from).collect()
    }

    fn persist(&self) {
        self.slot.save_best_effort(&self.lines);
    }
}
