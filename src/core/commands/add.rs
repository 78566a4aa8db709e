// src/core/commands/add.rs

use crate::core::ShiftError;
use crate::core::commands::command_trait::{
    CommandFlags, CommandSpec, ExecutableCommand, ParseCommand,
};
use crate::core::commands::{ExecutionContext, Reply};
use crate::core::state::AddOutcome;
use async_trait::async_trait;

/// `add`: appends an entry for the session's username stamped with the
/// current time, unless one already exists. The check and the append happen
/// inside one critical section of the queue lock.
#[derive(Debug, Clone, Default)]
pub struct Add;

impl ParseCommand for Add {
    fn parse(_args: &[&str]) -> Result<Self, ShiftError> {
        Ok(Add)
    }
}

#[async_trait]
impl ExecutableCommand for Add {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<Reply, ShiftError> {
        let line = match ctx.state.wait_queue.add(ctx.username).await {
            AddOutcome::Added => "OK",
            AddOutcome::AlreadyQueued => "You are already in the list.",
        };
        Ok(Reply::Single(line.to_string()))
    }
}

impl CommandSpec for Add {
    fn name(&self) -> &'static str {
        "add"
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE
    }
}
