//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Category, Price, ProductId};

/// An immutable catalog entry.
///
/// Field names serialize in camelCase (`imageUrl`), the stored cart layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    pub category: Category,
    /// Shown on the home page when set.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
}

impl Product {
    /// Case-insensitive substring match against title or description.
    ///
    /// An empty needle matches every product.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
