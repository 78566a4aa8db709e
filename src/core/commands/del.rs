// src/core/commands/del.rs

use crate::core::ShiftError;
use crate::core::commands::command_trait::{
    CommandFlags, CommandSpec, ExecutableCommand, ParseCommand,
};
use crate::core::commands::{ExecutionContext, Reply};
use async_trait::async_trait;

/// `del <pos>`: removes the entry at the given position. A missing argument,
/// a surplus argument, a non-numeric argument, and an out-of-range index all
/// collapse into the same error response.
///
/// Positions are evaluated against the queue as it is at execution time; an
/// index read from an earlier `list` may name a different entry by then.
#[derive(Debug, Clone, Default)]
pub struct Del {
    pub pos: Option<usize>,
}

impl ParseCommand for Del {
    fn parse(args: &[&str]) -> Result<Self, ShiftError> {
        // Exactly one argument; anything else answers "delete error".
        let pos = match args {
            [arg] => arg.parse().ok(),
            _ => None,
        };
        Ok(Del { pos })
    }
}

#[async_trait]
impl ExecutableCommand for Del {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<Reply, ShiftError> {
        let line = match self.pos {
            Some(pos) if ctx.state.wait_queue.remove_at(pos).await => "User removed.",
            _ => "delete error",
        };
        Ok(Reply::Single(line.to_string()))
    }
}

impl CommandSpec for Del {
    fn name(&self) -> &'static str {
        "del"
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE | CommandFlags::ADMIN
    }
}
