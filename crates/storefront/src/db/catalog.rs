//! Product catalog store.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use digital_market_core::{Product, ProductId};

use super::RepositoryError;

/// Catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Immutable, ordered collection of products.
///
/// Cheap to clone; clones share the same product list.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    products: Arc<[Product]>,
}

impl CatalogRepository {
    /// Build a catalog from products, rejecting duplicate IDs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, RepositoryError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(RepositoryError::Conflict(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }
        Ok(Self {
            products: products.into(),
        })
    }

    /// The catalog embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the embedded JSON is
    /// invalid (caught by this module's tests).
    pub fn builtin() -> Result<Self, RepositoryError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the JSON does not match the
    /// product schema, or `RepositoryError::Conflict` on duplicate IDs.
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        let products: Vec<Product> = serde_json::from_str(json)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid catalog: {e}")))?;
        Self::new(products)
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read, otherwise the
    /// same errors as [`Self::from_json`].
    pub async fn load_file(path: &Path) -> Result<Self, RepositoryError> {
        tracing::info!(path = %path.display(), "Loading catalog from file");
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| RepositoryError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
        Self::from_json(&content)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// The product with `id`, if any.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use digital_market_core::{Category, Price};

    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = CatalogRepository::builtin().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.all().iter().filter(|p| p.featured).count(), 2);

        let first = catalog.find(&ProductId::new("1")).unwrap();
        assert_eq!(first.price, Price::from_cents(2999));
        assert_eq!(first.category, Category::Ebook);
    }

    #[test]
    fn test_find_missing_is_none() {
        let catalog = CatalogRepository::builtin().unwrap();
        assert!(catalog.find(&ProductId::new("nope")).is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let catalog = CatalogRepository::builtin().unwrap();
        let mut products = catalog.all().to_vec();
        products.push(products.first().cloned().unwrap());
        assert!(matches!(
            CatalogRepository::new(products),
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            CatalogRepository::from_json(r#"[{"id":"1"}]"#),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id":"x","title":"T","description":"D","price":"5","imageUrl":"u","category":"template"}]"#,
        )
        .unwrap();

        let catalog = CatalogRepository::load_file(&path).await.unwrap();
        assert_eq!(catalog.len(), 1);

        let missing = CatalogRepository::load_file(&dir.path().join("missing.json")).await;
        assert!(matches!(missing, Err(RepositoryError::Io { .. })));
    }
}
