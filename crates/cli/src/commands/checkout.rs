//! Checkout commands.

use digital_market_storefront::forms::PaymentForm;
use digital_market_storefront::{Checkout, CheckoutError, Location, Result, Storefront};

/// Print the order summary shown beside the payment form.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if there is nothing to check out.
#[allow(clippy::print_stdout)]
pub fn summary(storefront: &Storefront) -> Result<()> {
    let cart = storefront.open_cart();
    if cart.is_empty() {
        println!("Continue to {}", Location::Cart);
        return Err(CheckoutError::EmptyCart.into());
    }

    println!("Order summary");
    for line in cart.lines() {
        println!(
            "  {} × {}  {}",
            line.quantity,
            line.product.title,
            line.subtotal()
        );
    }
    println!("Total: {}", cart.total_price());
    Ok(())
}

/// Pay for the cart with `form`.
///
/// # Errors
///
/// Returns the checkout error if the order cannot be placed.
#[allow(clippy::print_stdout)]
pub async fn place_order(storefront: &Storefront, form: PaymentForm) -> Result<()> {
    let mut cart = storefront.open_cart();
    let mut checkout = Checkout::begin(&cart)?;
    *checkout.form_mut() = form;

    let total = cart.total_price();
    let confirmation = checkout.submit(&mut cart, &storefront.orders()).await?;

    println!("Payment of {total} accepted");
    println!(
        "Order {} placed on {}",
        confirmation.order_id,
        confirmation.placed_on.format("%B %-d, %Y")
    );
    println!("Continue to {}", Location::from(&confirmation));
    Ok(())
}
