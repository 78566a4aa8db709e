// src/core/commands/mod.rs

//! The text command protocol: parsing one line into a command and executing
//! it against the shared state.

pub mod add;
pub mod chpin;
pub mod command_trait;
pub mod del;
pub mod exit;
pub mod list;
pub mod shutdown;

use crate::core::ShiftError;
use crate::core::state::{ServerState, SessionRole};
use command_trait::{CommandFlags, CommandSpec, ExecutableCommand, ParseCommand};
use std::sync::Arc;

pub use add::Add;
pub use chpin::ChPin;
pub use del::Del;
pub use exit::Exit;
pub use list::List;
pub use shutdown::Shutdown;

/// Everything a command needs to execute: the shared state plus the identity
/// of the session issuing it.
pub struct ExecutionContext<'a> {
    pub state: &'a Arc<ServerState>,
    pub session_id: u64,
    pub username: &'a str,
    pub role: SessionRole,
}

/// A command's response: one line or several, written back in order on the
/// issuing connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Single(String),
    Multiple(Vec<String>),
}

impl Reply {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Reply::Single(line) => vec![line],
            Reply::Multiple(lines) => lines,
        }
    }
}

/// One parsed command line.
#[derive(Debug, Clone)]
pub enum Command {
    List(List),
    Add(Add),
    Del(Del),
    ChPin(ChPin),
    Exit(Exit),
    Shutdown(Shutdown),
}

impl Command {
    /// Parses a raw line: the first whitespace-separated token selects the
    /// command, the rest become its arguments. Unknown or empty tokens fail
    /// with `UnknownCommand` and no state change.
    pub fn parse(line: &str) -> Result<Self, ShiftError> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match name {
            "list" => List::parse(&args).map(Command::List),
            "add" => Add::parse(&args).map(Command::Add),
            "del" => Del::parse(&args).map(Command::Del),
            "chpin" => ChPin::parse(&args).map(Command::ChPin),
            "exit" => Exit::parse(&args).map(Command::Exit),
            "shutdown" => Shutdown::parse(&args).map(Command::Shutdown),
            other => Err(ShiftError::UnknownCommand(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::List(c) => c.name(),
            Command::Add(c) => c.name(),
            Command::Del(c) => c.name(),
            Command::ChPin(c) => c.name(),
            Command::Exit(c) => c.name(),
            Command::Shutdown(c) => c.name(),
        }
    }

    pub fn flags(&self) -> CommandFlags {
        match self {
            Command::List(c) => c.flags(),
            Command::Add(c) => c.flags(),
            Command::Del(c) => c.flags(),
            Command::ChPin(c) => c.flags(),
            Command::Exit(c) => c.flags(),
            Command::Shutdown(c) => c.flags(),
        }
    }

    pub async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<Reply, ShiftError> {
        match self {
            Command::List(c) => c.execute(ctx).await,
            Command::Add(c) => c.execute(ctx).await,
            Command::Del(c) => c.execute(ctx).await,
            Command::ChPin(c) => c.execute(ctx).await,
            Command::Exit(c) => c.execute(ctx).await,
            Command::Shutdown(c) => c.execute(ctx).await,
        }
    }
}

/// Rejects admin-flagged commands issued from a non-admin session. The
/// restriction is enforced here, at the processor boundary, not just implied
/// by the command menu shown at login.
pub fn check_permission(command: &Command, role: SessionRole) -> Result<(), ShiftError> {
    if command.flags().contains(CommandFlags::ADMIN) && role != SessionRole::Admin {
        return Err(ShiftError::PermissionDenied);
    }
    Ok(())
}
