//! Cart commands.

use digital_market_core::ProductId;
use digital_market_storefront::error::add_breadcrumb;
use digital_market_storefront::{AppError, CheckoutError, Location, Result, Storefront};

/// Print cart lines and totals.
#[allow(clippy::print_stdout)]
pub fn show(storefront: &Storefront) {
    let cart = storefront.open_cart();
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for line in cart.lines() {
        println!(
            "{:>4}  {:<45} {:>3} × {:>9} = {:>9}",
            line.product.id,
            line.product.title,
            line.quantity,
            line.product.price.to_string(),
            line.subtotal().to_string()
        );
    }
    println!();
    println!("Items: {}", cart.total_items());
    println!("Total: {}", cart.total_price());
}

/// Add one unit of the product `id`.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no product has this ID.
#[allow(clippy::print_stdout)]
pub async fn add(storefront: &Storefront, id: &ProductId) -> Result<()> {
    let product = storefront
        .catalog()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_owned()))?;

    let mut cart = storefront.open_cart();
    cart.add(&product);
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));

    println!(
        "Added {} (quantity {})",
        product.title,
        cart.quantity_of(&product.id)
    );
    println!("Cart: {} item(s), {}", cart.total_items(), cart.total_price());
    Ok(())
}

/// Drop the line for `id`.
#[allow(clippy::print_stdout)]
pub fn remove(storefront: &Storefront, id: &ProductId) {
    let mut cart = storefront.open_cart();
    cart.remove(id);
    println!("Cart: {} item(s), {}", cart.total_items(), cart.total_price());
}

#[allow(clippy::print_stdout)]
pub fn clear(storefront: &Storefront) {
    storefront.open_cart().clear();
    println!("Cart cleared");
}

/// Print where the cart's checkout button leads.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if there is nothing to check out.
#[allow(clippy::print_stdout)]
pub fn proceed(storefront: &Storefront) -> Result<()> {
    if storefront.open_cart().is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }
    let session = storefront.restore_session();
    println!("{}", Location::proceed_to_checkout(&session));
    Ok(())
}
