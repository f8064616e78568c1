//! Authentication service.
//!
//! Provides plaintext email/password login and signup against the
//! [`AccountRepository`], plus lookup of the persisted session.
//!
//! Users returned by this service always have their password scrubbed.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument};

use digital_market_core::{User, UserId};

use super::simulate_latency;
use crate::config::LatencyProfile;
use crate::db::{AccountRepository, RepositoryError};
use crate::storage::{DurableSlot, SharedStore, keys};

/// Authentication service.
#[derive(Debug, Clone)]
pub struct AuthService<'a> {
    accounts: &'a AccountRepository,
    session_slot: DurableSlot<User>,
    latency: &'a LatencyProfile,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(
        accounts: &'a AccountRepository,
        store: SharedStore,
        latency: &'a LatencyProfile,
    ) -> Self {
        Self {
            accounts,
            session_slot: DurableSlot::new(store, keys::CURRENT_USER),
            latency,
        }
    }

    /// Login with email and password.
    ///
    /// Both fields must match an account exactly. Returns `Ok(None)` when no
    /// account matches; that is an ordinary outcome, not a failure.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Service` if the simulated call fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Option<User>, AuthError> {
        simulate_latency(self.latency.login).await;

        let user = self
            .accounts
            .find_by_credentials(email, password.expose_secret())
            .await
            .map(|u| u.scrubbed());

        match &user {
            Some(u) => info!(user_id = %u.id, "Login succeeded"),
            None => info!("Login rejected: no matching account"),
        }
        Ok(user)
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` if an account already uses this exact
    /// email; the store is left unchanged.
    #[instrument(skip(self, name, password), fields(email = %email))]
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, AuthError> {
        simulate_latency(self.latency.signup).await;

        let user = User {
            id: UserId::generate(),
            email: email.to_owned(),
            password: password.expose_secret().to_owned(),
            name: name.to_owned(),
        };
        let scrubbed = user.scrubbed();

        self.accounts.insert(user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::Repository(other),
        })?;

        info!(user_id = %scrubbed.id, "Account created");
        Ok(scrubbed)
    }

    /// The user recorded in the durable session slot, if any.
    ///
    /// Malformed slot content is discarded rather than reported.
    pub fn current_session(&self) -> Option<User> {
        self.session_slot.load()
    }

    /// Handle on the durable session slot.
    #[must_use]
    pub fn session_slot(&self) -> DurableSlot<User> {
        self.session_slot.clone()
    }
}
