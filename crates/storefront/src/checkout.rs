//! Checkout orchestrator.
//!
//! A one-shot workflow: validate the payment form, submit a snapshot of the
//! cart, and on success clear the cart and record the confirmation.
//!
//! ```text
//! Editing ──submit──▶ Submitting ──success──▶ Confirmed
//!    ▲                    │
//!    └──────failure───────┘
//! ```

use chrono::Local;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::cart::Cart;
use crate::forms::{FormErrors, PaymentForm};
use crate::models::Confirmation;
use crate::services::{OrderSubmitter, ServiceError};

/// Errors returned by [`Checkout`].
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to buy. Callers send the shopper back to the cart.
    #[error("cart is empty")]
    EmptyCart,

    #[error("payment details are invalid: {0}")]
    InvalidForm(FormErrors),

    /// A submission is already waiting on the order service.
    #[error("order submission already in progress")]
    InFlight,

    /// This checkout already placed its order.
    #[error("order already placed")]
    AlreadyCompleted,

    /// The order service answered but declined the order.
    #[error("order was not accepted")]
    Rejected,

    #[error("order service error: {0}")]
    Service(#[from] ServiceError),
}

/// Where the checkout workflow stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStep {
    Editing,
    Submitting,
    Confirmed(Confirmation),
}

/// One checkout attempt over the shopper's cart.
#[derive(Debug)]
pub struct Checkout {
    form: PaymentForm,
    step: CheckoutStep,
}

impl Checkout {
    /// Start a checkout for `cart`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines.
    pub fn begin(cart: &Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            form: PaymentForm::default(),
            step: CheckoutStep::Editing,
        })
    }

    #[must_use]
    pub const fn form(&self) -> &PaymentForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut PaymentForm {
        &mut self.form
    }

    #[must_use]
    pub const fn step(&self) -> &CheckoutStep {
        &self.step
    }

    /// The confirmation, once the order has been placed.
    #[must_use]
    pub const fn confirmation(&self) -> Option<&Confirmation> {
        match &self.step {
            CheckoutStep::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    /// Whether the submit action should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.step == CheckoutStep::Editing && self.form.is_valid()
    }

    /// Place the order.
    ///
    /// On success the cart is cleared and the checkout moves to
    /// [`CheckoutStep::Confirmed`]. On failure the cart is untouched and the
    /// checkout returns to [`CheckoutStep::Editing`] so the shopper can retry.
    ///
    /// # Errors
    ///
    /// `AlreadyCompleted`, `InFlight`, `EmptyCart` and `InvalidForm` are
    /// returned before the order service is called. `Rejected` and
    /// `Service` report a failed submission.
    #[instrument(skip_all, fields(lines = cart.lines().len()))]
    pub async fn submit<S: OrderSubmitter>(
        &mut self,
        cart: &mut Cart,
        orders: &S,
    ) -> Result<Confirmation, CheckoutError> {
        match self.step {
            CheckoutStep::Confirmed(_) => return Err(CheckoutError::AlreadyCompleted),
            CheckoutStep::Submitting => return Err(CheckoutError::InFlight),
            CheckoutStep::Editing => {}
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.form.validate().map_err(CheckoutError::InvalidForm)?;

        let lines = cart.order_lines();
        let submitting = SubmittingGuard::enter(&mut self.step);
        let outcome = orders.create_order(&lines).await;

        match outcome {
            Ok(receipt) if receipt.success => {
                cart.clear();
                let confirmation = Confirmation {
                    order_id: receipt.order_id,
                    placed_on: Local::now().date_naive(),
                };
                info!(order_id = %confirmation.order_id, "Checkout complete");
                submitting.confirm(confirmation.clone());
                Ok(confirmation)
            }
            Ok(receipt) => {
                error!(order_id = %receipt.order_id, "Order rejected");
                Err(CheckoutError::Rejected)
            }
            Err(e) => {
                error!(error = %e, "Order submission failed");
                Err(CheckoutError::Service(e))
            }
        }
    }
}

/// Holds the checkout in [`CheckoutStep::Submitting`].
///
/// Dropping the guard without confirming returns the checkout to
/// [`CheckoutStep::Editing`], including when the submit future is dropped
/// while the order service call is pending.
struct SubmittingGuard<'a> {
    step: &'a mut CheckoutStep,
}

impl<'a> SubmittingGuard<'a> {
    fn enter(step: &'a mut CheckoutStep) -> Self {
        *step = CheckoutStep::Submitting;
        Self { step }
    }

    fn confirm(self, confirmation: Confirmation) {
        *self.step = CheckoutStep::Confirmed(confirmation);
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        if *self.step == CheckoutStep::Submitting {
            *self.step = CheckoutStep::Editing;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use digital_market_core::{Category, OrderId, Price, Product, ProductId};

    use super::*;
    use crate::models::{OrderLine, OrderReceipt};
    use crate::storage::{KeyValueStore, MemoryStore, keys};

    #[derive(Default)]
    struct CountingSubmitter {
        calls: AtomicUsize,
        accept: bool,
    }

    impl CountingSubmitter {
        fn accepting() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                accept: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl OrderSubmitter for CountingSubmitter {
        async fn create_order(&self, lines: &[OrderLine]) -> Result<OrderReceipt, ServiceError> {
            assert!(!lines.is_empty());
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OrderReceipt {
                order_id: OrderId::new("ORDER-1700000000000"),
                success: self.accept,
            })
        }
    }

    struct FailingSubmitter;

    impl OrderSubmitter for FailingSubmitter {
        async fn create_order(&self, _lines: &[OrderLine]) -> Result<OrderReceipt, ServiceError> {
            Err(ServiceError::Failed("connection reset".to_owned()))
        }
    }

    struct StalledSubmitter;

    impl OrderSubmitter for StalledSubmitter {
        async fn create_order(&self, _lines: &[OrderLine]) -> Result<OrderReceipt, ServiceError> {
            std::future::pending().await
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(2999),
            image_url: String::new(),
            category: Category::Template,
            featured: false,
        }
    }

    fn filled_cart(store: &MemoryStore) -> Cart {
        let mut cart = Cart::hydrate(Arc::new(store.clone()));
        cart.add(&product("1"));
        cart.add(&product("2"));
        cart
    }

    fn fill_form(checkout: &mut Checkout) {
        let form = checkout.form_mut();
        form.name = "Ada Lovelace".to_owned();
        form.email = "ada@example.com".to_owned();
        form.card_number = "4242424242424242".to_owned();
        form.card_expiry = "12/30".to_owned();
        form.card_cvc = "123".to_owned();
    }

    #[test]
    fn test_begin_rejects_empty_cart() {
        let cart = Cart::hydrate(Arc::new(MemoryStore::new()));
        assert!(matches!(Checkout::begin(&cart), Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_empty_cart_never_submits() {
        let store = MemoryStore::new();
        let mut cart = filled_cart(&store);
        let mut checkout = Checkout::begin(&cart).unwrap();
        fill_form(&mut checkout);
        cart.clear();

        let orders = CountingSubmitter::accepting();
        let result = checkout.submit(&mut cart, &orders).await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert_eq!(orders.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_form_never_submits() {
        let store = MemoryStore::new();
        let mut cart = filled_cart(&store);
        let mut checkout = Checkout::begin(&cart).unwrap();
        assert!(!checkout.can_submit());

        let orders = CountingSubmitter::accepting();
        let result = checkout.submit(&mut cart, &orders).await;
        assert!(matches!(result, Err(CheckoutError::InvalidForm(_))));
        assert_eq!(orders.calls(), 0);
        assert_eq!(checkout.step(), &CheckoutStep::Editing);
    }

    #[tokio::test]
    async fn test_success_clears_cart_and_confirms() {
        let store = MemoryStore::new();
        let mut cart = filled_cart(&store);
        let mut checkout = Checkout::begin(&cart).unwrap();
        fill_form(&mut checkout);
        assert!(checkout.can_submit());

        let orders = CountingSubmitter::accepting();
        let confirmation = checkout.submit(&mut cart, &orders).await.unwrap();

        assert!(!confirmation.order_id.as_str().is_empty());
        assert_eq!(orders.calls(), 1);
        assert!(cart.is_empty());
        assert_eq!(store.get(keys::CART).unwrap().as_deref(), Some("[]"));
        assert_eq!(checkout.confirmation(), Some(&confirmation));
        assert!(!checkout.can_submit());
    }

    #[tokio::test]
    async fn test_second_submit_is_refused() {
        let store = MemoryStore::new();
        let mut cart = filled_cart(&store);
        let mut checkout = Checkout::begin(&cart).unwrap();
        fill_form(&mut checkout);

        let orders = CountingSubmitter::accepting();
        checkout.submit(&mut cart, &orders).await.unwrap();
        cart.add(&product("3"));

        let again = checkout.submit(&mut cart, &orders).await;
        assert!(matches!(again, Err(CheckoutError::AlreadyCompleted)));
        assert_eq!(orders.calls(), 1);
    }

    #[tokio::test]
    async fn test_in_flight_checkout_refuses_submit() {
        let store = MemoryStore::new();
        let mut cart = filled_cart(&store);
        let mut checkout = Checkout::begin(&cart).unwrap();
        fill_form(&mut checkout);
        checkout.step = CheckoutStep::Submitting;

        let orders = CountingSubmitter::accepting();
        let result = checkout.submit(&mut cart, &orders).await;
        assert!(matches!(result, Err(CheckoutError::InFlight)));
        assert!(!checkout.can_submit());
        assert_eq!(orders.calls(), 0);
    }

    #[tokio::test]
    async fn test_rejection_keeps_cart_and_allows_retry() {
        let store = MemoryStore::new();
        let mut cart = filled_cart(&store);
        let mut checkout = Checkout::begin(&cart).unwrap();
        fill_form(&mut checkout);

        let rejecting = CountingSubmitter::default();
        let result = checkout.submit(&mut cart, &rejecting).await;
        assert!(matches!(result, Err(CheckoutError::Rejected)));
        assert_eq!(cart.total_items(), 2);
        assert!(checkout.can_submit());

        let accepting = CountingSubmitter::accepting();
        assert!(checkout.submit(&mut cart, &accepting).await.is_ok());
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_keeps_cart() {
        let store = MemoryStore::new();
        let mut cart = filled_cart(&store);
        let mut checkout = Checkout::begin(&cart).unwrap();
        fill_form(&mut checkout);

        let result = checkout.submit(&mut cart, &FailingSubmitter).await;
        assert!(matches!(result, Err(CheckoutError::Service(_))));
        assert_eq!(cart.total_items(), 2);
        assert_eq!(checkout.step(), &CheckoutStep::Editing);
    }

    #[tokio::test]
    async fn test_abandoned_submit_returns_to_editing() {
        let store = MemoryStore::new();
        let mut cart = filled_cart(&store);
        let mut checkout = Checkout::begin(&cart).unwrap();
        fill_form(&mut checkout);

        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            checkout.submit(&mut cart, &StalledSubmitter),
        )
        .await;
        assert!(pending.is_err());
        assert_eq!(checkout.step(), &CheckoutStep::Editing);
        assert!(checkout.can_submit());
        assert_eq!(cart.total_items(), 2);

        let orders = CountingSubmitter::accepting();
        assert!(checkout.submit(&mut cart, &orders).await.is_ok());
        assert_eq!(orders.calls(), 1);
    }
}
