mod common;

use common::{exec, exec_lines, test_server};
use shiftd::core::ShiftError;
use shiftd::core::commands::Command;
use shiftd::core::commands::command_trait::CommandFlags;
use shiftd::core::state::SessionRole;

#[tokio::test]
async fn test_unknown_command() {
    let server = test_server();
    let err = exec(&server.state, "alice", SessionRole::User, "frobnicate")
        .await
        .unwrap_err();
    assert!(matches!(err, ShiftError::UnknownCommand(_)));
    assert_eq!(err.to_string(), "Unrecognized command.");
}

#[tokio::test]
async fn test_empty_line_is_unrecognized() {
    let server = test_server();
    let err = exec(&server.state, "alice", SessionRole::User, "")
        .await
        .unwrap_err();
    assert!(matches!(err, ShiftError::UnknownCommand(_)));
}

#[test]
fn test_command_names_are_case_sensitive() {
    assert!(matches!(
        Command::parse("LIST"),
        Err(ShiftError::UnknownCommand(_))
    ));
    assert!(Command::parse("list").is_ok());
}

#[test]
fn test_admin_flags_cover_exactly_the_gated_commands() {
    for (line, admin_only) in [
        ("list", false),
        ("add", false),
        ("del 0", true),
        ("chpin 4321", true),
        ("exit", false),
        ("shutdown", true),
    ] {
        let command = Command::parse(line).unwrap();
        assert_eq!(
            command.flags().contains(CommandFlags::ADMIN),
            admin_only,
            "unexpected ADMIN flag for {line:?}"
        );
    }
}

#[test]
fn test_command_spec_names() {
    let command = Command::parse("del 3").unwrap();
    assert_eq!(command.name(), "del");
    let command = Command::parse("chpin 4321").unwrap();
    assert_eq!(command.name(), "chpin");
}

#[tokio::test]
async fn test_exit_says_goodbye() {
    let server = test_server();
    let reply = exec_lines(&server.state, "alice", SessionRole::User, "exit").await;
    assert_eq!(reply, vec!["Goodbye."]);
}

#[tokio::test]
async fn test_shutdown_denied_for_regular_users() {
    let server = test_server();
    let err = exec(&server.state, "alice", SessionRole::User, "shutdown")
        .await
        .unwrap_err();
    assert!(matches!(err, ShiftError::PermissionDenied));
    assert!(server.state.is_running());
}

#[tokio::test]
async fn test_shutdown_snapshots_queue() {
    let server = test_server();
    common::exec_lines(&server.state, "alice", SessionRole::User, "add").await;

    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "shutdown").await;
    assert_eq!(reply, vec!["Server shutting down..."]);

    let snapshot = std::fs::read_to_string(&server.state.config.queue_path).unwrap();
    let lines: Vec<&str> = snapshot.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("alice-"));
}
