//! Mock service layer.
//!
//! Each service stands in for a remote backend: calls are `async`, sleep for
//! a configured delay without blocking the executor, and then operate on the
//! in-memory stores from [`crate::db`].
//!
//! # Services
//!
//! - [`catalog`] - Product queries
//! - [`auth`] - Login, signup and session lookup
//! - [`orders`] - Order submission

pub mod auth;
pub mod catalog;
pub mod orders;

use std::time::Duration;

use thiserror::Error;

pub use auth::{AuthError, AuthService};
pub use catalog::{CatalogFilter, CatalogService};
pub use orders::{OrderService, OrderSubmitter};

/// Generic failure of a simulated remote call.
///
/// Callers treat every variant the same way: log, keep the previous state,
/// and let the user retry.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The remote operation did not complete.
    #[error("operation failed: {0}")]
    Failed(String),
}

/// Suspend the calling task for a simulated round trip.
async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
