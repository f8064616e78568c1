//! Account store.
//!
//! Emails are compared exactly (case-sensitive, no trimming). Passwords are
//! stored and compared in plaintext; this store exists to back a simulated
//! login flow and must not hold real credentials.

use tokio::sync::RwLock;

use digital_market_core::{User, UserId};

use super::RepositoryError;

/// Mutable collection of user accounts.
#[derive(Debug, Default)]
pub struct AccountRepository {
    users: RwLock<Vec<User>>,
}

impl AccountRepository {
    /// Create a store holding `users`.
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// A store seeded with the demo account (`demo@example.com` / `password123`).
    #[must_use]
    pub fn with_demo_account() -> Self {
        Self::new(vec![User {
            id: UserId::new("1"),
            email: "demo@example.com".to_owned(),
            password: "password123".to_owned(),
            name: "Demo User".to_owned(),
        }])
    }

    /// Find the account whose email and password both match exactly.
    pub async fn find_by_credentials(&self, email: &str, password: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email == email && u.password == password)
            .cloned()
    }

    /// Append a new account.
    ///
    /// The uniqueness check and the append happen under one write lock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or ID is already taken.
    pub async fn insert(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        if users.iter().any(|u| u.id == user.id) {
            return Err(RepositoryError::Conflict("user id already exists".to_owned()));
        }
        users.push(user);
        Ok(())
    }

    /// Number of accounts.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no accounts.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
