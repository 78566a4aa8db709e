// tests/common/mod.rs

//! Shared helpers for the unit test suites: a ServerState backed by a
//! temporary directory, and a one-shot command dispatcher mirroring the
//! session handler's parse / permission-check / execute pipeline.

use shiftd::config::Config;
use shiftd::core::ShiftError;
use shiftd::core::commands::{Command, ExecutionContext, Reply, check_permission};
use shiftd::core::state::{ServerState, SessionRole};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::broadcast;

pub struct TestServer {
    pub state: Arc<ServerState>,
    // Held so the backing files outlive the state.
    #[allow(dead_code)]
    pub dir: TempDir,
}

#[allow(dead_code)]
pub fn test_server() -> TestServer {
    let dir = TempDir::new().unwrap();
    let path = |name: &str| dir.path().join(name).to_string_lossy().into_owned();
    let config = Config {
        users_path: path("users.txt"),
        pin_path: path("pin.bin"),
        queue_path: path("wait_queue.txt"),
        ..Config::default()
    };
    let (shutdown_tx, _) = broadcast::channel(1);
    let state = ServerState::initialize(config, shutdown_tx);
    TestServer { state, dir }
}

#[allow(dead_code)]
pub async fn exec(
    state: &Arc<ServerState>,
    username: &str,
    role: SessionRole,
    line: &str,
) -> Result<Reply, ShiftError> {
    let command = Command::parse(line)?;
    check_permission(&command, role)?;
    let mut ctx = ExecutionContext {
        state,
        session_id: 1,
        username,
        role,
    };
    command.execute(&mut ctx).await
}

/// Executes a line that is expected to succeed and returns its response
/// lines.
#[allow(dead_code)]
pub async fn exec_lines(
    state: &Arc<ServerState>,
    username: &str,
    role: SessionRole,
    line: &str,
) -> Vec<String> {
    exec(state, username, role, line).await.unwrap().into_lines()
}
