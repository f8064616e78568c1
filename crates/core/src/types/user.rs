//! Account record.

use serde::{Deserialize, Serialize};

use super::UserId;

/// A storefront account.
///
/// The password is held in plaintext, and the record handed back to callers
/// after login or signup carries an empty password rather than omitting the
/// field. `Debug` redacts the password either way.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub name: String,
}

impl User {
    /// A copy of this user with the password replaced by an empty string.
    #[must_use]
    pub fn scrubbed(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }

    /// Whether the password field has been scrubbed.
    #[must_use]
    pub fn is_scrubbed(&self) -> bool {
        self.password.is_empty()
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}
