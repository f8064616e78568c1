//! Storefront routes.
//!
//! | Path                              | Location                 |
//! |-----------------------------------|--------------------------|
//! | `/`                               | [`Location::Home`]       |
//! | `/products?category=&search=`     | [`Location::Products`]   |
//! | `/products/:id`                   | [`Location::Product`]    |
//! | `/cart`                           | [`Location::Cart`]       |
//! | `/checkout`                       | [`Location::Checkout`]   |
//! | `/checkout/success?orderId=`      | [`Location::CheckoutSuccess`] |
//! | `/login?redirect=`                | [`Location::Login`]      |
//! | `/signup?redirect=`               | [`Location::Signup`]     |
//!
//! Redirect targets carried through login and signup are only honoured when
//! they stay on this site.

use std::fmt;

use thiserror::Error;
use tracing::warn;
use url::Url;

use digital_market_core::{OrderId, ProductId};

use crate::models::Confirmation;
use crate::services::CatalogFilter;
use crate::session::Session;

/// Origin used to resolve relative paths. Never dereferenced.
const ORIGIN: &str = "http://digital-market.invalid/";

/// Errors from [`Location::parse`].
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("malformed location {input:?}: {source}")]
    Malformed {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no page at {0}")]
    NotFound(String),
}

/// A page of the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Home,
    Products(CatalogFilter),
    Product(ProductId),
    Cart,
    Checkout,
    CheckoutSuccess { order_id: Option<OrderId> },
    Login { redirect: Option<String> },
    Signup { redirect: Option<String> },
}

impl Location {
    /// Parse a path (with optional query) into a location.
    ///
    /// Unknown categories and empty search terms are dropped from product
    /// listings rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::Malformed` if `input` cannot be resolved as
    /// a URL, and `NavigationError::NotFound` if it names another site or no
    /// known page.
    pub fn parse(input: &str) -> Result<Self, NavigationError> {
        let malformed = |source| NavigationError::Malformed {
            input: input.to_owned(),
            source,
        };
        let base = Url::parse(ORIGIN).map_err(malformed)?;
        let url = base.join(input).map_err(malformed)?;
        if url.origin() != base.origin() {
            return Err(NavigationError::NotFound(input.to_owned()));
        }

        let segments: Vec<String> = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .map(decode)
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let param = |name: &str| {
            url.query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty())
        };

        let location = match segments.as_slice() {
            [] => Self::Home,
            ["products"] => Self::Products(CatalogFilter {
                category: param("category").and_then(|c| c.parse().ok()),
                search: param("search"),
            }),
            ["products", id] => Self::Product(ProductId::new(*id)),
            ["cart"] => Self::Cart,
            ["checkout"] => Self::Checkout,
            ["checkout", "success"] => Self::CheckoutSuccess {
                order_id: param("orderId").map(OrderId::new),
            },
            ["login"] => Self::Login {
                redirect: param("redirect"),
            },
            ["signup"] => Self::Signup {
                redirect: param("redirect"),
            },
            _ => return Err(NavigationError::NotFound(url.path().to_owned())),
        };
        Ok(location)
    }

    /// Where the cart's checkout button leads.
    ///
    /// Anonymous shoppers are sent to login first and brought back to
    /// checkout afterwards.
    #[must_use]
    pub fn proceed_to_checkout(session: &Session) -> Self {
        if session.is_authenticated() {
            Self::Checkout
        } else {
            Self::Login {
                redirect: Some(Self::Checkout.to_string()),
            }
        }
    }

    /// Where to go after a successful login or signup.
    #[must_use]
    pub fn after_auth(redirect: Option<&str>) -> Self {
        redirect
            .map(sanitize_redirect)
            .and_then(|target| Self::parse(&target).ok())
            .unwrap_or(Self::Home)
    }
}

impl From<&Confirmation> for Location {
    fn from(confirmation: &Confirmation) -> Self {
        Self::CheckoutSuccess {
            order_id: Some(confirmation.order_id.clone()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Products(filter) => {
                f.write_str("/products")?;
                write_query(
                    f,
                    &[
                        ("category", filter.category.map(|c| c.as_str())),
                        ("search", filter.search.as_deref()),
                    ],
                )
            }
            Self::Product(id) => write!(f, "/products/{}", urlencoding::encode(id.as_str())),
            Self::Cart => f.write_str("/cart"),
            Self::Checkout => f.write_str("/checkout"),
            Self::CheckoutSuccess { order_id } => {
                f.write_str("/checkout/success")?;
                write_query(f, &[("orderId", order_id.as_ref().map(OrderId::as_str))])
            }
            Self::Login { redirect } => {
                f.write_str("/login")?;
                write_query(f, &[("redirect", redirect.as_deref())])
            }
            Self::Signup { redirect } => {
                f.write_str("/signup")?;
                write_query(f, &[("redirect", redirect.as_deref())])
            }
        }
    }
}

fn write_query(f: &mut fmt::Formatter<'_>, params: &[(&str, Option<&str>)]) -> fmt::Result {
    let mut separator = '?';
    for (key, value) in params {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            write!(f, "{separator}{key}={}", urlencoding::encode(value))?;
            separator = '&';
        }
    }
    Ok(())
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment).map_or_else(|_| segment.to_owned(), |s| s.into_owned())
}

/// Reduce a post-auth redirect target to a same-site path.
///
/// Relative targets such as `checkout` become absolute (`/checkout`).
/// Targets on another origin, or that cannot be resolved, become `/`.
#[must_use]
pub fn sanitize_redirect(target: &str) -> String {
    let target = target.trim();
    if target.is_empty() {
        return "/".to_owned();
    }

    let Ok(base) = Url::parse(ORIGIN) else {
        return "/".to_owned();
    };
    match base.join(target) {
        Ok(url) if url.origin() == base.origin() => {
            let mut path = url.path().to_owned();
            if let Some(query) = url.query() {
                path.push('?');
                path.push_str(query);
            }
            path
        }
        _ => {
            warn!(target, "Ignoring off-site redirect");
            "/".to_owned()
        }
    }
}
