// src/core/commands/chpin.rs

use crate::core::ShiftError;
use crate::core::commands::command_trait::{
    CommandFlags, CommandSpec, ExecutableCommand, ParseCommand,
};
use crate::core::commands::{ExecutionContext, Reply};
use async_trait::async_trait;
use tracing::warn;

/// The smallest PIN `chpin` accepts. There is no upper bound.
const MIN_PIN: i32 = 1000;

/// `chpin <pin>`: persists a new admin PIN. The new value takes effect for
/// the next admin authentication; the current session is unaffected.
#[derive(Debug, Clone, Default)]
pub struct ChPin {
    pub pin: Option<i32>,
}

impl ParseCommand for ChPin {
    fn parse(args: &[&str]) -> Result<Self, ShiftError> {
        // Exactly one argument; anything else is an error response.
        let pin = match args {
            [arg] => arg.parse().ok(),
            _ => None,
        };
        Ok(ChPin { pin })
    }
}

#[async_trait]
impl ExecutableCommand for ChPin {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<Reply, ShiftError> {
        let line = match self.pin {
            Some(pin) if pin >= MIN_PIN => match ctx.state.credential.store(pin).await {
                Ok(()) => "PIN changed.",
                Err(e) => {
                    // Here the write result is the response, so the failure
                    // surfaces to the client instead of being swallowed.
                    warn!("Failed to persist new PIN: {}", e);
                    "Error changing PIN."
                }
            },
            _ => "Error changing PIN.",
        };
        Ok(Reply::Single(line.to_string()))
    }
}

impl CommandSpec for ChPin {
    fn name(&self) -> &'static str {
        "chpin"
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE | CommandFlags::ADMIN
    }
}
