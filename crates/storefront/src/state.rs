//! Storefront state shared by front ends.
//!
//! The catalog and account stores are built once here and handed to the
//! services by reference.

use std::sync::Arc;

use tracing::info;

use crate::cart::Cart;
use crate::config::StorefrontConfig;
use crate::db::{AccountRepository, CatalogRepository};
use crate::error::Result;
use crate::services::{AuthService, CatalogService, OrderService};
use crate::session::Session;
use crate::storage::{FileStore, SharedStore};

/// Storefront state.
///
/// Cheaply cloneable via `Arc`; clones share the stores.
#[derive(Debug, Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

#[derive(Debug)]
struct StorefrontInner {
    config: StorefrontConfig,
    catalog: CatalogRepository,
    accounts: AccountRepository,
    store: SharedStore,
}

impl Storefront {
    /// Open the storefront described by `config`.
    ///
    /// The durable store lives in `config.data_dir`. The catalog comes from
    /// `config.catalog_path` when set, otherwise from the built-in data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// catalog cannot be read.
    pub async fn open(config: StorefrontConfig) -> Result<Self> {
        let store = FileStore::open(&config.data_dir)?;
        let catalog = match &config.catalog_path {
            Some(path) => CatalogRepository::load_file(path).await?,
            None => CatalogRepository::builtin()?,
        };
        info!(
            data_dir = %config.data_dir.display(),
            products = catalog.len(),
            "Storefront opened"
        );

        Ok(Self::with_parts(
            config,
            catalog,
            AccountRepository::with_demo_account(),
            Arc::new(store),
        ))
    }

    /// Assemble a storefront from already-built parts.
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        catalog: CatalogRepository,
        accounts: AccountRepository,
        store: SharedStore,
    ) -> Self {
        Self {
            inner: Arc::new(StorefrontInner {
                config,
                catalog,
                accounts,
                store,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The durable store holding the cart and session slots.
    #[must_use]
    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.inner.store)
    }

    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(&self.inner.catalog, &self.inner.config.latency)
    }

    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(
            &self.inner.accounts,
            self.store(),
            &self.inner.config.latency,
        )
    }

    #[must_use]
    pub fn orders(&self) -> OrderService {
        OrderService::from_profile(&self.inner.config.latency)
    }

    /// Load the shopper's cart from the durable store.
    #[must_use]
    pub fn open_cart(&self) -> Cart {
        Cart::hydrate(self.store())
    }

    /// Restore the signed-in user from the durable store.
    #[must_use]
    pub fn restore_session(&self) -> Session {
        Session::restore(&self.auth())
    }
}
