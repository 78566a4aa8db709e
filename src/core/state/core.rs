// src/core/state/core.rs

//! Defines the central `ServerState` struct, holding all shared server-wide state.

use super::client::ClientMap;
use super::credential::AdminCredential;
use super::queue::SharedQueue;
use super::users::KnownUsers;
use crate::config::Config;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// The central struct holding all shared, server-wide state.
///
/// This struct is wrapped in an `Arc` and passed to every connection handler
/// and background path, providing a single source of truth. Each mutable
/// resource (known users, wait queue, admin credential, connection registry)
/// carries its own lock; no code path holds two of them at once.
#[derive(Debug)]
pub struct ServerState {
    /// The startup-loaded allow-list of usernames.
    pub known_users: KnownUsers,
    /// The ordered sequence of pending requesters.
    pub wait_queue: SharedQueue,
    /// The PIN-based admin credential.
    pub credential: AdminCredential,
    /// A map of all active client connections, keyed by a unique session ID.
    /// Stores client metadata and a shutdown sender for targeted connection
    /// termination.
    pub clients: ClientMap,
    /// The server's runtime configuration, fixed for the process lifetime.
    pub config: Config,
    /// True while the server is accepting and serving connections. Cleared
    /// exactly once, by whichever shutdown path runs first.
    is_running: AtomicBool,
    /// The broadcast channel every task subscribes to for global shutdown.
    shutdown_tx: broadcast::Sender<()>,
}

impl ServerState {
    /// Creates the shared state from a configuration. The caller is expected
    /// to populate the known-user list and wait queue from persistence before
    /// serving.
    pub fn initialize(config: Config, shutdown_tx: broadcast::Sender<()>) -> Arc<Self> {
        let credential = AdminCredential::new(&config.pin_path);
        Arc::new(Self {
            known_users: KnownUsers::default(),
            wait_queue: SharedQueue::default(),
            credential,
            clients: Arc::new(DashMap::new()),
            config,
            is_running: AtomicBool::new(true),
            shutdown_tx,
        })
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    /// Obtains a fresh receiver for the global shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Clears the running flag and fires the shutdown signal. Idempotent:
    /// repeated calls only re-send the broadcast, which late subscribers
    /// simply observe once.
    pub fn begin_shutdown(&self) {
        self.is_running.store(false, Ordering::SeqCst);
        if self.shutdown_tx.send(()).is_err() {
            debug!("Shutdown signalled with no live subscribers.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn begin_shutdown_reaches_subscribers_and_clears_the_flag() {
        let (shutdown_tx, _) = broadcast::channel(1);
        let state = ServerState::initialize(Config::default(), shutdown_tx);

        let mut rx = state.subscribe_shutdown();
        assert!(state.is_running());

        state.begin_shutdown();
        assert!(!state.is_running());
        assert!(rx.recv().await.is_ok());
    }
}
