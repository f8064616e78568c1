//! Session aggregate.
//!
//! Holds the authenticated user, if any, and mirrors it into the
//! `currentUser` slot: written on login and signup, removed on logout.

use secrecy::SecretString;
use tracing::info;

use digital_market_core::User;

use crate::services::{AuthError, AuthService};
use crate::storage::DurableSlot;

/// Who is signed in.
#[derive(Debug)]
pub struct Session {
    user: Option<User>,
    slot: DurableSlot<User>,
}

impl Session {
    /// Restore the session recorded by `auth`'s slot.
    #[must_use]
    pub fn restore(auth: &AuthService<'_>) -> Self {
        Self {
            user: auth.current_session(),
            slot: auth.session_slot(),
        }
    }

    /// The signed-in user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Sign in with `email` and `password`.
    ///
    /// Returns `Ok(false)` when no account matches; the session is left as
    /// it was.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the service call fails.
    pub async fn login(
        &mut self,
        auth: &AuthService<'_>,
        email: &str,
        password: &SecretString,
    ) -> Result<bool, AuthError> {
        let Some(user) = auth.login(email, password).await? else {
            return Ok(false);
        };
        self.establish(user);
        Ok(true)
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` if the email is registered; the
    /// session is left as it was.
    pub async fn signup(
        &mut self,
        auth: &AuthService<'_>,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<&User, AuthError> {
        let user = auth.signup(name, email, password).await?;
        Ok(self.establish(user))
    }

    /// Sign out and forget the stored session.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "Logged out");
        }
        self.slot.clear_best_effort();
    }

    fn establish(&mut self, user: User) -> &User {
        self.slot.save_best_effort(&user);
        self.user.insert(user)
    }
}
