// src/core/commands/exit.rs

use crate::core::ShiftError;
use crate::core::commands::command_trait::{
    CommandFlags, CommandSpec, ExecutableCommand, ParseCommand,
};
use crate::core::commands::{ExecutionContext, Reply};
use async_trait::async_trait;

/// `exit`: says goodbye; the session handler closes the connection after the
/// response is sent. Other sessions are unaffected.
#[derive(Debug, Clone, Default)]
pub struct Exit;

impl ParseCommand for Exit {
    fn parse(_args: &[&str]) -> Result<Self, ShiftError> {
        Ok(Exit)
    }
}

#[async_trait]
impl ExecutableCommand for Exit {
    async fn execute<'a>(&self, _ctx: &mut ExecutionContext<'a>) -> Result<Reply, ShiftError> {
        Ok(Reply::Single("Goodbye.".to_string()))
    }
}

impl CommandSpec for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
}
