// src/connection/handler.rs

//! Defines the `ConnectionHandler` which manages the full lifecycle of a client connection.

use super::guard::ConnectionGuard;
use super::session::SessionState;
use crate::core::commands::{Command, ExecutionContext, check_permission};
use crate::core::state::{ServerState, SessionRole};
use crate::core::ShiftError;
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info, warn};

/// The longest line the codec accepts before the session is treated as
/// faulty.
const MAX_LINE_LENGTH: usize = 1024;

/// The next step for the connection's main loop to take.
enum NextAction {
    Continue,
    ExitLoop,
    /// Fire the global shutdown signal, then exit the loop. Deferred to the
    /// handler so the command's response line is flushed before the
    /// dispatcher starts force-closing connections.
    ShutdownServer,
}

/// Manages the full lifecycle of a client connection: greeting,
/// authentication, the command loop, and cleanup.
pub struct ConnectionHandler {
    framed: Framed<TcpStream, LinesCodec>,
    addr: SocketAddr,
    state: Arc<ServerState>,
    session_id: u64,
    shutdown_rx: broadcast::Receiver<()>,
    global_shutdown_rx: broadcast::Receiver<()>,
    session: SessionState,
}

impl ConnectionHandler {
    /// Creates a new `ConnectionHandler`.
    pub fn new(
        socket: TcpStream,
        addr: SocketAddr,
        state: Arc<ServerState>,
        session_id: u64,
        shutdown_rx: broadcast::Receiver<()>,
        global_shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            framed: Framed::new(socket, LinesCodec::new_with_max_length(MAX_LINE_LENGTH)),
            addr,
            state,
            session_id,
            shutdown_rx,
            global_shutdown_rx,
            session: SessionState::new(),
        }
    }

    /// The main event loop for the connection, handling incoming lines and
    /// shutdown signals.
    pub async fn run(&mut self) -> Result<(), ShiftError> {
        let _guard = ConnectionGuard::new(self.state.clone(), self.session_id, self.addr);

        if !self.authenticate().await? {
            return Ok(());
        }

        'main_loop: loop {
            tokio::select! {
                // Prioritize shutdown signals over client input.
                biased;
                _ = self.global_shutdown_rx.recv() => {
                    info!("Connection handler for {} received global shutdown signal.", self.addr);
                    let _ = self.framed.send("Server shutting down...").await;
                    break 'main_loop;
                }
                _ = self.shutdown_rx.recv() => {
                    info!("Connection handler for {} received kill signal.", self.addr);
                    break 'main_loop;
                }
                result = self.framed.next() => {
                    match result {
                        Some(Ok(raw)) => {
                            let line = raw.trim_end_matches('\r').to_string();
                            match self.process_line(&line).await {
                                Ok(NextAction::Continue) => {}
                                Ok(NextAction::ExitLoop) => break 'main_loop,
                                Ok(NextAction::ShutdownServer) => {
                                    self.state.begin_shutdown();
                                    break 'main_loop;
                                }
                                Err(e) if e.is_client_visible() => {
                                    if let ShiftError::UnknownCommand(token) = &e {
                                        debug!(
                                            "Session {}: unrecognized command token {:?}",
                                            self.session_id, token
                                        );
                                    }
                                    self.framed.send(e.to_string()).await?;
                                }
                                Err(e) => return Err(e),
                            }
                        }
                        Some(Err(e)) => {
                            let e: ShiftError = e.into();
                            if is_normal_disconnect(&e) {
                                debug!("Connection from {} closed by peer: {}", self.addr, e);
                            } else {
                                warn!("Connection error for {}: {}", self.addr, e);
                            }
                            break 'main_loop;
                        }
                        None => {
                            debug!("Connection from {} closed by peer.", self.addr);
                            break 'main_loop;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Runs the greeting and authentication exchange. Returns `Ok(false)`
    /// when the session must end without entering the command loop (EOF,
    /// unknown user, wrong PIN).
    async fn authenticate(&mut self) -> Result<bool, ShiftError> {
        self.framed.send("Welcome. Enter your name:").await?;
        let Some(username) = self.read_line().await? else {
            debug!("Connection from {} ended before a username.", self.addr);
            return Ok(false);
        };

        if username == "admin" {
            self.framed.send("Enter PIN:").await?;
            let pin = self.state.credential.current().await;
            let Some(supplied) = self.read_line().await? else {
                debug!("Connection from {} ended before a PIN.", self.addr);
                return Ok(false);
            };

            if supplied != pin.to_string() {
                warn!("Failed admin authentication from {}.", self.addr);
                self.framed.send("Incorrect PIN. Disconnecting...").await?;
                return Ok(false);
            }

            self.session.username = username;
            self.session.role = SessionRole::Admin;
            self.framed
                .send("Access granted. Commands: list, add, del pos, chpin pin, exit, shutdown.")
                .await?;
        } else {
            if !self.state.known_users.contains(&username).await {
                info!("Unknown user {:?} from {}.", username, self.addr);
                self.framed.send("Unknown user. Disconnecting...").await?;
                return Ok(false);
            }

            self.session.username = username;
            self.session.role = SessionRole::User;
            self.framed.send("Access granted. Commands: list, add.").await?;
        }

        self.publish_identity().await;
        info!(
            "Session {} authenticated as {:?} ({:?}).",
            self.session_id, self.session.username, self.session.role
        );
        Ok(true)
    }

    /// Parses a line, enforces the session's tier, executes the command, and
    /// sends the response line(s).
    async fn process_line(&mut self, line: &str) -> Result<NextAction, ShiftError> {
        let command = Command::parse(line)?;
        debug!(
            "Session {}: received command: {}",
            self.session_id,
            command.name()
        );
        check_permission(&command, self.session.role)?;

        let reply = {
            let mut ctx = ExecutionContext {
                state: &self.state,
                session_id: self.session_id,
                username: &self.session.username,
                role: self.session.role,
            };
            command.execute(&mut ctx).await?
        };

        for response_line in reply.into_lines() {
            self.framed.send(response_line).await?;
        }

        match command {
            Command::Shutdown(_) => Ok(NextAction::ShutdownServer),
            Command::Exit(_) => Ok(NextAction::ExitLoop),
            _ => Ok(NextAction::Continue),
        }
    }

    /// Reads one line, normalizing a trailing carriage return away. `None`
    /// means the peer closed the stream.
    async fn read_line(&mut self) -> Result<Option<String>, ShiftError> {
        match self.framed.next().await {
            Some(Ok(line)) => Ok(Some(line.trim_end_matches('\r').to_string())),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// Records the resolved username and role in the connection registry, for
    /// observability during shutdown enumeration.
    async fn publish_identity(&self) {
        if let Some(entry) = self.state.clients.get(&self.session_id) {
            let mut client_info = entry.value().0.lock().await;
            client_info.username = Some(self.session.username.clone());
            client_info.role = self.session.role;
        }
    }
}

/// Helper function to check for non-critical disconnection errors.
fn is_normal_disconnect(e: &ShiftError) -> bool {
    matches!(e, ShiftError::Io(arc_err) if matches!(
        arc_err.kind(),
        std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::BrokenPipe
            | std::io::ErrorKind::UnexpectedEof
            | std::io::ErrorKind::ConnectionAborted
    ))
}
