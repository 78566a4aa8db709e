mod common;

use common::{exec, exec_lines, test_server};
use shiftd::core::ShiftError;
use shiftd::core::state::SessionRole;

#[tokio::test]
async fn test_chpin_persists_new_pin() {
    let server = test_server();

    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "chpin 4321").await;
    assert_eq!(reply, vec!["PIN changed."]);

    assert_eq!(server.state.credential.current().await, 4321);

    // Raw encoding on disk: 4 bytes, little endian.
    let bytes = std::fs::read(&server.state.config.pin_path).unwrap();
    assert_eq!(bytes, 4321i32.to_le_bytes());
}

#[tokio::test]
async fn test_chpin_default_applies_until_changed() {
    let server = test_server();
    assert_eq!(server.state.credential.current().await, 1234);

    exec_lines(&server.state, "admin", SessionRole::Admin, "chpin 9999").await;
    assert_eq!(server.state.credential.current().await, 9999);
}

#[tokio::test]
async fn test_chpin_rejects_low_pin() {
    let server = test_server();
    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "chpin 999").await;
    assert_eq!(reply, vec!["Error changing PIN."]);
    assert_eq!(server.state.credential.current().await, 1234);
}

#[tokio::test]
async fn test_chpin_rejects_non_numeric_and_missing() {
    let server = test_server();

    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "chpin abcd").await;
    assert_eq!(reply, vec!["Error changing PIN."]);

    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "chpin").await;
    assert_eq!(reply, vec!["Error changing PIN."]);
}

#[tokio::test]
async fn test_chpin_rejects_surplus_arguments() {
    let server = test_server();
    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "chpin 4321 junk").await;
    assert_eq!(reply, vec!["Error changing PIN."]);
    assert_eq!(server.state.credential.current().await, 1234);
}

#[tokio::test]
async fn test_chpin_accepts_large_pin() {
    // No upper bound is enforced.
    let server = test_server();
    let reply = exec_lines(&server.state, "admin", SessionRole::Admin, "chpin 2000000000").await;
    assert_eq!(reply, vec!["PIN changed."]);
    assert_eq!(server.state.credential.current().await, 2_000_000_000);
}

#[tokio::test]
async fn test_chpin_denied_for_regular_users() {
    let server = test_server();
    let err = exec(&server.state, "alice", SessionRole::User, "chpin 4321")
        .await
        .unwrap_err();
    assert!(matches!(err, ShiftError::PermissionDenied));
    assert_eq!(server.state.credential.current().await, 1234);
}
