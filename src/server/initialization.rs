// src/server/initialization.rs

//! Handles the complete server initialization process: state setup,
//! persistence loading, and binding the listening socket.

use super::context::ServerContext;
use crate::config::{Config, PORT_PROBE_END};
use crate::core::ShiftError;
use crate::core::persistence;
use crate::core::state::ServerState;
use anyhow::Result;
use std::path::Path;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Initializes all server components before starting the main loop.
pub async fn setup(config: Config) -> Result<ServerContext> {
    let (shutdown_tx, _) = broadcast::channel(1);

    let state = ServerState::initialize(config.clone(), shutdown_tx);
    info!("Server state initialized.");

    load_persistence_data(&state).await;

    let listener = bind_listener(&config.host, config.port).await?;
    info!("shiftd server listening on {}", listener.local_addr()?);

    Ok(ServerContext { state, listener })
}

/// Populates the known-user list and restores the wait-queue snapshot.
/// Missing or unreadable files fall back to empty defaults.
async fn load_persistence_data(state: &ServerState) {
    let users = persistence::load_users(Path::new(&state.config.users_path)).await;
    if users.is_empty() {
        warn!(
            "No known users loaded from {:?}; only the admin will be able to authenticate.",
            state.config.users_path
        );
    } else {
        info!("Loaded {} known users.", users.len());
    }
    state.known_users.replace(users).await;

    let entries = persistence::load_queue(Path::new(&state.config.queue_path)).await;
    if !entries.is_empty() {
        info!("Restored {} wait-queue entries from snapshot.", entries.len());
    }
    state.wait_queue.replace(entries).await;
}

/// Binds the listening socket, probing every port from `preferred_port` up
/// to (but not including) 65535 until one binds. Exhausting the range is
/// fatal: no listener, no service.
pub async fn bind_listener(host: &str, preferred_port: u16) -> Result<TcpListener, ShiftError> {
    for port in preferred_port..PORT_PROBE_END {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => {
                if port != preferred_port {
                    info!("Port {} was taken; bound {} instead.", preferred_port, port);
                }
                return Ok(listener);
            }
            Err(e) => debug!("Port {} unavailable: {}", port, e),
        }
    }
    Err(ShiftError::NoPortAvailable {
        start: preferred_port,
        end: PORT_PROBE_END,
    })
}
