//! Cart line types.

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use digital_market_core::{Price, Product, ProductId};

/// One product in the cart with its quantity.
///
/// The product is a copy taken when it was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartLine {
    /// A new line holding one unit of `product`.
    #[must_use]
    pub fn single(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// `price × quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}

/// A stored cart listed the same product twice.
#[derive(Debug, Error)]
#[error("duplicate cart line for product {0}")]
pub struct DuplicateLine(pub ProductId);

/// Ordered cart lines with at most one line per product.
///
/// Decoding rejects input that breaks the one-line-per-product rule, so a
/// tampered slot is treated as corrupt rather than loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct CartLines(Vec<CartLine>);

impl CartLines {
    /// The lines in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[CartLine] {
        &self.0
    }

    pub(crate) fn find_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.0.iter_mut().find(|l| &l.product.id == id)
    }

    pub(crate) fn push(&mut self, line: CartLine) {
        debug_assert!(self.0.iter().all(|l| l.product.id != line.product.id));
        self.0.push(line);
    }

    /// Drop the line for `id`. Returns whether a line was removed.
    pub(crate) fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.0.len();
        self.0.retain(|l| &l.product.id != id);
        self.0.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl TryFrom<Vec<CartLine>> for CartLines {
    type Error = DuplicateLine;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if !seen.insert(&line.product.id) {
                return Err(DuplicateLine(line.product.id.clone()));
            }
        }
        Ok(Self(lines))
    }
}

impl From<CartLines> for Vec<CartLine> {
    fn from(lines: CartLines) -> Self {
        lines.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use digital_market_core::Category;

    use super::*;

    fn product(id: &str, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents),
            image_url: String::new(),
            category: Category::Ebook,
            featured: false,
        }
    }

    #[test]
    fn test_subtotal() {
        let line = CartLine {
            product: product("1", 2999),
            quantity: NonZeroU32::new(3).unwrap(),
        };
        assert_eq!(line.subtotal().to_string(), "$89.97");
    }

    #[test]
    fn test_stored_layout() {
        let lines = CartLines::try_from(vec![CartLine::single(product("1", 500))]).unwrap();
        let json: serde_json::Value = serde_json::to_value(&lines).unwrap();
        let first = &json.as_array().unwrap().first().unwrap();
        assert_eq!(first["quantity"], 1);
        assert_eq!(first["product"]["id"], "1");
        assert!(first["product"].get("imageUrl").is_some());
    }

    #[test]
    fn test_decode_rejects_duplicate_products() {
        let line = CartLine::single(product("1", 500));
        let raw = serde_json::to_string(&vec![line.clone(), line]).unwrap();
        assert!(serde_json::from_str::<CartLines>(&raw).is_err());
    }

    #[test]
    fn test_decode_rejects_zero_quantity() {
        let raw = serde_json::to_string(&vec![CartLine::single(product("1", 500))])
            .unwrap()
            .replace("\"quantity\":1", "\"quantity\":0");
        assert!(serde_json::from_str::<CartLines>(&raw).is_err());
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut lines = CartLines::default();
        lines.push(CartLine::single(product("1", 500)));
        assert!(!lines.remove(&ProductId::new("2")));
        assert!(lines.remove(&ProductId::new("1")));
        assert!(lines.as_slice().is_empty());
    }
}
