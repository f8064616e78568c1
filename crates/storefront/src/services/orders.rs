//! Order submission service.
//!
//! There is no inventory, payment capture, or idempotency key: submitting the
//! same lines twice places two orders.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, instrument};

use digital_market_core::OrderId;

use super::{ServiceError, simulate_latency};
use crate::config::LatencyProfile;
use crate::models::{OrderLine, OrderReceipt};

/// Anything that can turn a cart snapshot into an order.
///
/// The checkout orchestrator is generic over this so tests can count or fail
/// submissions.
pub trait OrderSubmitter {
    /// Submit `lines` as a single order.
    fn create_order(
        &self,
        lines: &[OrderLine],
    ) -> impl Future<Output = Result<OrderReceipt, ServiceError>> + Send;
}

/// Mock order backend. Every submission succeeds.
#[derive(Debug, Clone, Copy)]
pub struct OrderService {
    latency: Duration,
}

impl OrderService {
    /// Create an order service that waits `latency` per submission.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Create an order service using the `create_order` delay of `profile`.
    #[must_use]
    pub const fn from_profile(profile: &LatencyProfile) -> Self {
        Self::new(profile.create_order)
    }
}

impl OrderSubmitter for OrderService {
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    async fn create_order(&self, lines: &[OrderLine]) -> Result<OrderReceipt, ServiceError> {
        simulate_latency(self.latency).await;

        let order_id = OrderId::from_timestamp(Utc::now());
        let items: u64 = lines.iter().map(|l| u64::from(l.quantity.get())).sum();
        info!(order_id = %order_id, items, "Order placed");

        Ok(OrderReceipt {
            order_id,
            success: true,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use digital_market_core::ProductId;

    use super::*;

    #[tokio::test]
    async fn test_create_order_succeeds_with_prefixed_id() {
        let service = OrderService::new(Duration::ZERO);
        let lines = [OrderLine {
            product_id: ProductId::new("1"),
            quantity: NonZeroU32::new(2).unwrap(),
        }];
        let receipt = service.create_order(&lines).await.unwrap();
        assert!(receipt.success);
        assert!(receipt.order_id.as_str().starts_with(OrderId::PREFIX));
        assert!(receipt.order_id.as_str().len() > OrderId::PREFIX.len());
    }

    #[tokio::test]
    async fn test_create_order_waits_for_latency() {
        let service = OrderService::new(Duration::from_millis(20));
        let started = tokio::time::Instant::now();
        service.create_order(&[]).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
