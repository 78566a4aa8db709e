// src/core/commands/command_trait.rs

//! Defines the core traits for all executable commands.

use super::{ExecutionContext, Reply};
use crate::core::ShiftError;
use async_trait::async_trait;
use bitflags::bitflags;

bitflags! {
    /// Flags that describe the properties and behavior of a command. The
    /// session handler uses these to enforce tier-based restrictions before
    /// execution.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CommandFlags: u32 {
        /// The command modifies shared state.
        const WRITE    = 1 << 0;
        /// The command only reads shared state.
        const READONLY = 1 << 1;
        /// The command is restricted to the admin session tier.
        const ADMIN    = 1 << 2;
    }
}

/// Builds a command from the whitespace-separated tokens that follow its
/// name. Commands tolerate surplus or malformed arguments at parse time and
/// collapse them into their own protocol-level error responses, so parsing
/// itself rarely fails.
pub trait ParseCommand: Sized {
    fn parse(args: &[&str]) -> Result<Self, ShiftError>;
}

/// Executes a command against the shared state, producing its response.
#[async_trait]
pub trait ExecutableCommand {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<Reply, ShiftError>;
}

/// Static metadata about a command.
pub trait CommandSpec {
    fn name(&self) -> &'static str;
    fn flags(&self) -> CommandFlags;
}
