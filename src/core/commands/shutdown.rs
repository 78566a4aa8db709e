// src/core/commands/shutdown.rs

use crate::core::ShiftError;
use crate::core::commands::command_trait::{
    CommandFlags, CommandSpec, ExecutableCommand, ParseCommand,
};
use crate::core::commands::{ExecutionContext, Reply};
use crate::core::persistence;
use async_trait::async_trait;
use std::path::Path;
use tracing::info;

/// `shutdown`: snapshots the wait queue. The session handler fires the
/// global shutdown signal once the response line has been flushed; the
/// dispatcher then drains the connection registry, closes every socket, and
/// the process exits.
#[derive(Debug, Clone, Default)]
pub struct Shutdown;

impl ParseCommand for Shutdown {
    fn parse(_args: &[&str]) -> Result<Self, ShiftError> {
        Ok(Shutdown)
    }
}

#[async_trait]
impl ExecutableCommand for Shutdown {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<Reply, ShiftError> {
        info!(
            "Shutdown requested by session {} ({}).",
            ctx.session_id, ctx.username
        );

        let entries = ctx.state.wait_queue.entries().await;
        persistence::save_queue_best_effort(Path::new(&ctx.state.config.queue_path), &entries)
            .await;

        Ok(Reply::Single("Server shutting down...".to_string()))
    }
}

impl CommandSpec for Shutdown {
    fn name(&self) -> &'static str {
        "shutdown"
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::ADMIN
    }
}
