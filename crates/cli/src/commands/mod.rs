//! CLI command implementations.
//!
//! Each command opens the aggregates it needs from the [`Storefront`], acts,
//! and prints the result. Cart and session changes persist through the
//! durable store, so consecutive invocations see each other's effects.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;

use digital_market_storefront::{AppError, Location, Result, Storefront};

/// Print the shopper-facing message for a failed command.
#[allow(clippy::print_stderr)]
pub fn print_failure(error: &AppError) {
    eprintln!("Error: {}", error.user_message());
}

/// Render the page at `path`.
///
/// # Errors
///
/// Returns `AppError::Navigation` if the path names no page.
#[allow(clippy::print_stdout)]
pub async fn open(storefront: &Storefront, path: &str) -> Result<()> {
    let location = Location::parse(path)?;
    tracing::debug!(%location, "Opening page");

    match location {
        Location::Home => catalog::home(storefront).await,
        Location::Products(filter) => catalog::list_filtered(storefront, &filter, false).await,
        Location::Product(id) => catalog::show(storefront, &id).await,
        Location::Cart => {
            cart::show(storefront);
            Ok(())
        }
        Location::Checkout => checkout::summary(storefront),
        Location::CheckoutSuccess { order_id } => {
            let order_id = order_id.ok_or_else(|| AppError::NotFound("Order".to_owned()))?;
            println!("Thank you for your purchase!");
            println!("Order {order_id} has been placed.");
            Ok(())
        }
        Location::Login { redirect } => {
            println!("Log in with: dm-cli login --email <EMAIL> --password <PASSWORD>");
            if let Some(redirect) = redirect {
                println!("Afterwards: {}", Location::after_auth(Some(redirect.as_str())));
            }
            Ok(())
        }
        Location::Signup { redirect } => {
            println!(
                "Sign up with: dm-cli signup --name <NAME> --email <EMAIL> \
                 --password <PASSWORD> --confirm-password <PASSWORD>"
            );
            if let Some(redirect) = redirect {
                println!("Afterwards: {}", Location::after_auth(Some(redirect.as_str())));
            }
            Ok(())
        }
    }
}
