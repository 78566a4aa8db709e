// src/core/state/client.rs

//! Contains state definitions related to client connections.

use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, broadcast};

pub type ShutdownSender = broadcast::Sender<()>;
pub type ClientStateTuple = (Arc<Mutex<ClientInfo>>, ShutdownSender);

/// The connection registry: every open session, keyed by session id. Holds
/// metadata and a kill channel per connection, never the socket itself; the
/// session's handler task owns the socket.
pub type ClientMap = Arc<DashMap<u64, ClientStateTuple>>;

/// The privilege tier of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionRole {
    /// The connection has not completed the username exchange yet.
    Unauthenticated,
    /// A username found in the known-users list.
    User,
    /// The PIN-authenticated administrator.
    Admin,
}

#[derive(Debug)]
pub struct ClientInfo {
    pub addr: SocketAddr,
    pub session_id: u64,
    pub username: Option<String>,
    pub role: SessionRole,
    pub created: Instant,
}
