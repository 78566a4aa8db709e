// src/connection/session.rs

//! Defines the state associated with a single client session.

use crate::core::state::SessionRole;

/// Holds the state specific to a single client session. The username and
/// role are resolved during the authentication exchange and fixed for the
/// rest of the session.
#[derive(Debug)]
pub struct SessionState {
    /// The claimed username, once the greeting exchange has resolved it.
    pub username: String,
    /// The session's privilege tier.
    pub role: SessionRole,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self {
            username: String::new(),
            role: SessionRole::Unauthenticated,
        }
    }
}
