//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::ServiceError;

/// Errors that can occur during authentication operations.
///
/// A login that matches no account is not an error; see
/// [`super::AuthService::login`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// An account with this email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Repository/store error.
    #[error("account store error: {0}")]
    Repository(#[from] RepositoryError),

    /// The simulated call failed.
    #[error("authentication service error: {0}")]
    Service(#[from] ServiceError),
}
