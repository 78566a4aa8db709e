// src/connection/mod.rs

//! Manages the lifecycle of a single client TCP connection: the greeting and
//! authentication exchange, the command loop, and session state management.

mod guard;
mod handler;
mod session;

pub use guard::ConnectionGuard;
pub use handler::ConnectionHandler;
pub use session::SessionState;
