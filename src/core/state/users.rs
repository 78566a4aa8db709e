// src/core/state/users.rs

//! The known-user allow-list, loaded once at startup.

use tokio::sync::Mutex;

/// The locked accessor for the known-user list. The list is read-mostly: it
/// is populated once at startup and no command mutates it, but lookups still
/// go through the lock so the container is never exposed raw. Duplicates are
/// permitted; the loader performs no validation.
#[derive(Debug, Default)]
pub struct KnownUsers {
    inner: Mutex<Vec<String>>,
}

impl KnownUsers {
    /// Replaces the list wholesale; called once during initialization.
    pub async fn replace(&self, users: Vec<String>) {
        *self.inner.lock().await = users;
    }

    /// True if `username` is an exact match for a loaded entry.
    pub async fn contains(&self, username: &str) -> bool {
        self.inner.lock().await.iter().any(|u| u == username)
    }
}
