//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for front ends. [`AppError::report`]
//! captures internal failures to Sentry, and [`AppError::user_message`] gives
//! the text that is safe to show the shopper.

use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::forms::FormErrors;
use crate::navigation::NavigationError;
use crate::services::{AuthError, ServiceError};
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog or account store failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A mock service call failed.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Form input failed validation.
    #[error("Invalid input: {0}")]
    Form(#[from] FormErrors),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Login matched no account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether this error points at a fault in the system rather than at
    /// what the shopper did.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Config(_) | Self::Repository(_) | Self::Storage(_) | Self::Service(_) => true,
            Self::Auth(err) => !matches!(err, AuthError::EmailTaken),
            Self::Checkout(err) => matches!(err, CheckoutError::Service(_)),
            Self::Form(_)
            | Self::Navigation(_)
            | Self::InvalidCredentials
            | Self::NotFound(_) => false,
        }
    }

    /// Log the error, capturing internal failures to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
    }

    /// Message safe to show the shopper.
    ///
    /// Internal details are never exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Repository(_) | Self::Storage(_) => {
                "Internal error".to_owned()
            }
            Self::Service(_) => "Service unavailable, please try again".to_owned(),
            Self::Auth(err) => match err {
                AuthError::EmailTaken => "An account with this email already exists".to_owned(),
                AuthError::Service(_) => "Service unavailable, please try again".to_owned(),
                AuthError::Repository(_) => "Internal error".to_owned(),
            },
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => "Your cart is empty".to_owned(),
                CheckoutError::InvalidForm(errors) => errors.to_string(),
                CheckoutError::InFlight => "Your order is already being placed".to_owned(),
                CheckoutError::AlreadyCompleted => "This order has already been placed".to_owned(),
                CheckoutError::Rejected | CheckoutError::Service(_) => {
                    "Your order could not be placed, please try again".to_owned()
                }
            },
            Self::Form(errors) => errors.to_string(),
            Self::Navigation(_) => "Page not found".to_owned(),
            Self::InvalidCredentials => "Invalid credentials".to_owned(),
            Self::NotFound(what) => format!("{what} not found"),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a shopper action.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product".to_string());
        assert_eq!(err.to_string(), "Not found: Product");
        assert_eq!(err.user_message(), "Product not found");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::from(RepositoryError::DataCorruption("bad row 7".to_string()));
        assert!(err.is_internal());
        assert_eq!(err.user_message(), "Internal error");

        let err = AppError::from(ServiceError::Failed("socket closed".to_string()));
        assert!(!err.user_message().contains("socket"));
    }

    #[test]
    fn test_auth_messages() {
        let taken = AppError::from(AuthError::EmailTaken);
        assert!(!taken.is_internal());
        assert_eq!(
            taken.user_message(),
            "An account with this email already exists"
        );
        assert_eq!(AppError::InvalidCredentials.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_checkout_messages() {
        let empty = AppError::from(CheckoutError::EmptyCart);
        assert!(!empty.is_internal());
        assert_eq!(empty.user_message(), "Your cart is empty");

        let failed = AppError::from(CheckoutError::Service(ServiceError::Failed(
            "timeout".to_string(),
        )));
        assert!(failed.is_internal());
        assert!(!failed.user_message().contains("timeout"));
    }
}
