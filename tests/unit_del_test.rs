mod common;

use common::{exec, exec_lines, test_server};
use shiftd::core::ShiftError;
use shiftd::core::state::SessionRole;

#[tokio::test]
async fn test_del_valid_index_removes_entry() {
    let server = test_server();
    exec_lines(&server.state, "alice", SessionRole::User, "add").await;
    exec_lines(&server.state, "bob", SessionRole::User, "add").await;

    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "del 0").await;
    assert_eq!(reply, vec!["User removed."]);

    let rendered = server.state.wait_queue.render().await;
    assert_eq!(rendered.len(), 1);
    assert!(rendered[0].starts_with("bob-"));
}

#[tokio::test]
async fn test_del_out_of_range_leaves_queue_unchanged() {
    let server = test_server();
    exec_lines(&server.state, "alice", SessionRole::User, "add").await;

    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "del 5").await;
    assert_eq!(reply, vec!["delete error"]);
    assert_eq!(server.state.wait_queue.len().await, 1);
}

#[tokio::test]
async fn test_del_missing_argument() {
    let server = test_server();
    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "del").await;
    assert_eq!(reply, vec!["delete error"]);
}

#[tokio::test]
async fn test_del_non_numeric_argument() {
    let server = test_server();
    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "del abc").await;
    assert_eq!(reply, vec!["delete error"]);
}

#[tokio::test]
async fn test_del_negative_argument() {
    let server = test_server();
    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "del -1").await;
    assert_eq!(reply, vec!["delete error"]);
}

#[tokio::test]
async fn test_del_surplus_arguments_leave_queue_unchanged() {
    let server = test_server();
    exec_lines(&server.state, "alice", SessionRole::User, "add").await;

    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "del 0 junk").await;
    assert_eq!(reply, vec!["delete error"]);
    assert_eq!(server.state.wait_queue.len().await, 1);
}

#[tokio::test]
async fn test_del_denied_for_regular_users() {
    let server = test_server();
    exec_lines(&server.state, "alice", SessionRole::User, "add").await;

    let err = exec(&server.state, "alice", SessionRole::User, "del 0")
        .await
        .unwrap_err();
    assert!(matches!(err, ShiftError::PermissionDenied));
    assert_eq!(server.state.wait_queue.len().await, 1);
}
