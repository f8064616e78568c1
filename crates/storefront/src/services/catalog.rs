//! Catalog query service.

use tracing::{debug, instrument};

use digital_market_core::{Category, Product, ProductId};

use super::{ServiceError, simulate_latency};
use crate::config::LatencyProfile;
use crate::db::CatalogRepository;

/// Read-only queries over the catalog.
///
/// Every result is an owned copy; callers cannot reach the store through it.
#[derive(Debug, Clone, Copy)]
pub struct CatalogService<'a> {
    catalog: &'a CatalogRepository,
    latency: &'a LatencyProfile,
}

impl<'a> CatalogService<'a> {
    /// Create a catalog service over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a CatalogRepository, latency: &'a LatencyProfile) -> Self {
        Self { catalog, latency }
    }

    /// Every product, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the simulated call fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Product>, ServiceError> {
        simulate_latency(self.latency.list_products).await;
        Ok(self.catalog.all().to_vec())
    }

    /// The product with `id`, or `None` if there is no such product.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the simulated call fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, ServiceError> {
        simulate_latency(self.latency.get_product).await;
        let product = self.catalog.find(id).cloned();
        if product.is_none() {
            debug!("Product not found");
        }
        Ok(product)
    }

    /// Products flagged as featured.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the simulated call fails.
    #[instrument(skip(self))]
    pub async fn list_featured(&self) -> Result<Vec<Product>, ServiceError> {
        simulate_latency(self.latency.list_products).await;
        Ok(self
            .catalog
            .all()
            .iter()
            .filter(|p| p.featured)
            .cloned()
            .collect())
    }

    /// Products tagged with `category`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the simulated call fails.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn list_by_category(&self, category: Category) -> Result<Vec<Product>, ServiceError> {
        simulate_latency(self.latency.list_products).await;
        Ok(self
            .catalog
            .all()
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }
}

/// Listing filter: category tag AND free-text search.
///
/// An unset part does not restrict the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Whether any part of the filter is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.search.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Whether `product` passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.is_none_or(|c| product.category == c)
            && self
                .search
                .as_deref()
                .is_none_or(|needle| product.matches_text(needle))
    }

    /// The products that pass the filter, in their original order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}
