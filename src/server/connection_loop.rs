// src/server/connection_loop.rs

//! Contains the main server loop for accepting connections and handling graceful shutdown.

use super::context::ServerContext;
use crate::connection::ConnectionHandler;
use crate::core::persistence;
use crate::core::state::{ClientInfo, ServerState, SessionRole};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// The main server loop that accepts connections and handles graceful shutdown.
///
/// Exits are reachable from three places: Unix signals, the admin `shutdown`
/// command (via the broadcast channel), and a cleared running flag observed
/// after an accept. All of them funnel into the same teardown path, which is
/// safe to reach concurrently with an in-flight `shutdown` command.
pub async fn run(ctx: ServerContext) {
    let ServerContext { state, listener } = ctx;

    let mut session_id_counter: u64 = 0;
    let mut client_tasks = JoinSet::new();
    let mut shutdown_rx = state.subscribe_shutdown();

    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to create SIGINT stream");
    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to create SIGTERM stream");

    loop {
        tokio::select! {
            biased;

            _ = sigint.recv() => {
                info!("SIGINT received, initiating graceful shutdown.");
                break;
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received, initiating graceful shutdown.");
                break;
            }
            _ = shutdown_rx.recv() => {
                info!("Shutdown signal received, leaving the accept loop.");
                break;
            }

            res = listener.accept() => {
                match res {
                    Ok((socket, addr)) => {
                        if !state.is_running() {
                            break;
                        }
                        info!("Accepted new connection from: {}", addr);

                        session_id_counter = session_id_counter.wrapping_add(1);
                        let session_id = session_id_counter;
                        let state_clone = state.clone();

                        let (conn_shutdown_tx, conn_shutdown_rx) = broadcast::channel(1);
                        let global_shutdown_rx = state.subscribe_shutdown();

                        let client_info = Arc::new(Mutex::new(ClientInfo {
                            addr,
                            session_id,
                            username: None,
                            role: SessionRole::Unauthenticated,
                            created: Instant::now(),
                        }));
                        state_clone.clients.insert(session_id, (client_info, conn_shutdown_tx));

                        client_tasks.spawn(async move {
                            let mut handler = ConnectionHandler::new(
                                socket,
                                addr,
                                state_clone,
                                session_id,
                                conn_shutdown_rx,
                                global_shutdown_rx,
                            );
                            if let Err(e) = handler.run().await {
                                warn!("Connection from {} terminated unexpectedly: {}", addr, e);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                    }
                }
            },

            Some(res) = client_tasks.join_next() => {
                if let Err(e) = res
                    && e.is_panic()
                {
                    error!("A client handler panicked: {e:?}");
                }
            },
        }
    }

    shutdown_server(&state, client_tasks).await;
    // The listener is dropped here, closing the listening socket.
}

/// The single teardown path: signal every task, force-close every registered
/// connection, snapshot the queue. Idempotent with respect to an admin
/// `shutdown` that already fired the signal and saved a snapshot.
async fn shutdown_server(state: &Arc<ServerState>, mut client_tasks: JoinSet<()>) {
    info!("Shutting down. Sending signal to all tasks.");
    state.begin_shutdown();

    // Per-connection kill channels unblock sessions parked on a read;
    // aborting the task set closes the sockets themselves. Individual send
    // failures just mean the session is already gone.
    for entry in state.clients.iter() {
        let _ = entry.value().1.send(());
    }
    client_tasks.shutdown().await;
    state.clients.clear();
    info!("All client connections closed.");

    let entries = state.wait_queue.entries().await;
    persistence::save_queue_best_effort(Path::new(&state.config.queue_path), &entries).await;

    info!("Server shutdown complete.");
}
