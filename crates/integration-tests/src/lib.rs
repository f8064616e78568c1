//! Integration tests for DigitalMarket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p digital-market-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - Browse, cart, login and checkout end to end
//! - `persistence` - Cart and session surviving a restart
//! - `accounts` - Signup and login against the account store
//!
//! Every test runs against a fresh temporary data directory with simulated
//! latency disabled.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::path::Path;

use secrecy::SecretString;
use tempfile::TempDir;
use thiserror::Error;

use digital_market_core::{Product, ProductId};
use digital_market_storefront::{AppError, Storefront, StorefrontConfig};

/// Demo account seeded into every storefront.
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password123";

/// Errors from setting up a test context.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to create temp dir: {0}")]
    TempDir(#[source] io::Error),

    #[error("failed to open storefront: {0}")]
    Storefront(#[source] AppError),
}

/// A storefront over its own temporary data directory.
///
/// [`TestContext::restart`] reopens the storefront over the same directory,
/// the way a second process invocation would.
pub struct TestContext {
    dir: TempDir,
    pub storefront: Storefront,
}

impl TestContext {
    /// Open a storefront in a new temporary directory.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the directory or storefront cannot be created.
    pub async fn new() -> Result<Self, SetupError> {
        let dir = tempfile::tempdir().map_err(SetupError::TempDir)?;
        let storefront = open(dir.path()).await?;
        Ok(Self { dir, storefront })
    }

    /// Reopen the storefront over the same data directory.
    ///
    /// Durable slots survive; the in-memory account store starts over from
    /// the seed data.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the storefront cannot be reopened.
    pub async fn restart(self) -> Result<Self, SetupError> {
        let Self { dir, storefront } = self;
        drop(storefront);
        let storefront = open(dir.path()).await?;
        Ok(Self { dir, storefront })
    }

    /// Path of the file backing the durable slot `key`.
    #[must_use]
    pub fn slot_path(&self, key: &str) -> std::path::PathBuf {
        self.dir.path().join(format!("{key}.json"))
    }

    /// Look up a built-in product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the product does not exist.
    pub async fn product(&self, id: &str) -> Result<Product, AppError> {
        self.storefront
            .catalog()
            .get_by_id(&ProductId::new(id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {id}")))
    }
}

async fn open(dir: &Path) -> Result<Storefront, SetupError> {
    Storefront::open(StorefrontConfig::instant(dir))
        .await
        .map_err(SetupError::Storefront)
}

/// Wrap a test password.
#[must_use]
pub fn secret(value: &str) -> SecretString {
    SecretString::from(value)
}
