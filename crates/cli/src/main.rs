//! DigitalMarket CLI - Browse, fill a cart, sign in and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! dm-cli products --category course --search web
//! dm-cli product 3
//!
//! # Manage the cart
//! dm-cli cart add 1
//! dm-cli cart show
//!
//! # Sign in (password may come from DM_PASSWORD)
//! dm-cli login -e demo@example.com --password password123
//!
//! # Place the order
//! dm-cli checkout --name "Demo User" --email demo@example.com \
//!     --card-number 4242424242424242 --expiry 12/30 --cvc 123
//!
//! # Visit a storefront path
//! dm-cli open "/products?category=ebook"
//! ```
//!
//! The cart and session are kept in `DM_DATA_DIR` between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use secrecy::SecretString;

use digital_market_core::{Category, ProductId};
use digital_market_storefront::forms::{PaymentForm, SignupForm};
use digital_market_storefront::{AppError, Result, Storefront, StorefrontConfig};

mod commands;
mod telemetry;

#[derive(Parser)]
#[command(name = "dm-cli")]
#[command(author, version, about = "DigitalMarket storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only this category (`ebook`, `course`, `template`)
        #[arg(short, long)]
        category: Option<Category>,

        /// Case-insensitive text in title or description
        #[arg(short, long)]
        search: Option<String>,

        /// Only featured products
        #[arg(long)]
        featured: bool,
    },
    /// Show one product
    Product {
        /// Product ID
        id: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(long, env = "DM_PASSWORD", hide_env_values = true)]
        password: String,

        /// Page to continue to afterwards
        #[arg(long)]
        redirect: Option<String>,
    },
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(long, env = "DM_PASSWORD", hide_env_values = true)]
        password: String,

        /// Repeat the password
        #[arg(long)]
        confirm_password: String,

        /// Page to continue to afterwards
        #[arg(long)]
        redirect: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Pay for the cart
    Checkout {
        /// Name on the card
        #[arg(long)]
        name: String,

        /// Receipt email
        #[arg(long)]
        email: String,

        #[arg(long)]
        card_number: String,

        /// Expiry date (MM/YY)
        #[arg(long)]
        expiry: String,

        #[arg(long)]
        cvc: String,
    },
    /// Visit a storefront path, e.g. `/products/3`
    Open {
        path: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: String,
    },
    /// Remove a product's line
    Remove {
        /// Product ID
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Show where the checkout button leads
    Proceed,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Sentry must be initialized before the tracing subscriber
    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(telemetry::init_sentry);
    telemetry::init_tracing();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            commands::print_failure(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<()> {
    let storefront = Storefront::open(config).await?;

    match cli.command {
        Commands::Products {
            category,
            search,
            featured,
        } => commands::catalog::list(&storefront, category, search, featured).await,
        Commands::Product { id } => commands::catalog::show(&storefront, &ProductId::from(id)).await,
        Commands::Cart { action } => match action {
            CartAction::Show => {
                commands::cart::show(&storefront);
                Ok(())
            }
            CartAction::Add { id } => commands::cart::add(&storefront, &ProductId::from(id)).await,
            CartAction::Remove { id } => {
                commands::cart::remove(&storefront, &ProductId::from(id));
                Ok(())
            }
            CartAction::Clear => {
                commands::cart::clear(&storefront);
                Ok(())
            }
            CartAction::Proceed => commands::cart::proceed(&storefront),
        },
        Commands::Login {
            email,
            password,
            redirect,
        } => {
            commands::account::login(
                &storefront,
                email,
                SecretString::from(password),
                redirect.as_deref(),
            )
            .await
        }
        Commands::Signup {
            name,
            email,
            password,
            confirm_password,
            redirect,
        } => {
            commands::account::signup(
                &storefront,
                SignupForm {
                    name,
                    email,
                    password: SecretString::from(password),
                    confirm_password: SecretString::from(confirm_password),
                },
                redirect.as_deref(),
            )
            .await
        }
        Commands::Logout => {
            commands::account::logout(&storefront);
            Ok(())
        }
        Commands::Whoami => {
            commands::account::whoami(&storefront);
            Ok(())
        }
        Commands::Checkout {
            name,
            email,
            card_number,
            expiry,
            cvc,
        } => {
            let form = PaymentForm {
                name,
                email,
                card_number,
                card_expiry: expiry,
                card_cvc: cvc,
            };
            commands::checkout::place_order(&storefront, form).await
        }
        Commands::Open { path } => commands::open(&storefront, &path).await,
    }
}
