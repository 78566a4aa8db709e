// src/core/commands/list.rs

use crate::core::ShiftError;
use crate::core::commands::command_trait::{
    CommandFlags, CommandSpec, ExecutableCommand, ParseCommand,
};
use crate::core::commands::{ExecutionContext, Reply};
use async_trait::async_trait;

/// `list`: a header line followed by every queue entry's display string, in
/// queue order.
#[derive(Debug, Clone, Default)]
pub struct List;

impl ParseCommand for List {
    fn parse(_args: &[&str]) -> Result<Self, ShiftError> {
        // Surplus arguments are ignored.
        Ok(List)
    }
}

#[async_trait]
impl ExecutableCommand for List {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<Reply, ShiftError> {
        let mut lines = vec!["Waiting list:".to_string()];
        lines.extend(ctx.state.wait_queue.render().await);
        Ok(Reply::Multiple(lines))
    }
}

impl CommandSpec for List {
    fn name(&self) -> &'static str {
        "list"
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
}
