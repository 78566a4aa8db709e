// src/connection/guard.rs

//! Defines `ConnectionGuard`, an RAII guard for connection resource management.

use crate::core::state::ServerState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// An RAII guard to ensure connection resources are always cleaned up when a
/// connection handler's scope is exited, whatever the exit path: a clean
/// `exit`, an EOF, an I/O fault, or a shutdown signal.
pub struct ConnectionGuard {
    state: Arc<ServerState>,
    session_id: u64,
    addr: SocketAddr,
}

impl ConnectionGuard {
    pub(crate) fn new(state: Arc<ServerState>, session_id: u64, addr: SocketAddr) -> Self {
        Self {
            state,
            session_id,
            addr,
        }
    }
}

impl Drop for ConnectionGuard {
    /// Removes the session from the connection registry. The socket itself
    /// is owned by the handler and closes when the handler is dropped.
    fn drop(&mut self) {
        debug!(
            "ConnectionGuard dropping, cleaning up resources for connection {}",
            self.addr
        );
        if self.state.clients.remove(&self.session_id).is_none() {
            debug!(
                "Client {} was not in the global state map upon cleanup.",
                self.addr
            );
        }
    }
}
