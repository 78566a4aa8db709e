// src/core/state/mod.rs

//! Defines the central `ServerState` struct and all related state components.
//! Each shared resource lives in its own sub-module behind an accessor type
//! that enforces its own mutual exclusion; raw containers are never exposed.

mod client;
mod core;
mod credential;
mod queue;
mod users;

pub use client::*;
pub use core::ServerState;
pub use credential::AdminCredential;
pub use queue::{AddOutcome, QueueEntry, SharedQueue, WaitQueue};
pub use users::KnownUsers;
