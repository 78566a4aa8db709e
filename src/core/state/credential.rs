// src/core/state/credential.rs

//! The admin credential: a single PIN persisted as raw bytes.

use crate::config::DEFAULT_PIN;
use crate::core::ShiftError;
use crate::core::persistence;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// The locked accessor for the admin PIN. The PIN lives on disk and is read
/// back on every authentication, so a `chpin` applies to the next session
/// without any in-memory cache to invalidate. The lock serializes file
/// access between concurrent authentications and PIN changes.
#[derive(Debug)]
pub struct AdminCredential {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl AdminCredential {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    /// The PIN currently in effect: the persisted value, or the default when
    /// the file is absent or unreadable.
    pub async fn current(&self) -> i32 {
        let _guard = self.io_lock.lock().await;
        persistence::load_pin(&self.path)
            .await
            .unwrap_or(DEFAULT_PIN)
    }

    /// Persists a new PIN, overwriting the previous one.
    pub async fn store(&self, pin: i32) -> Result<(), ShiftError> {
        let _guard = self.io_lock.lock().await;
        persistence::save_pin(&self.path, pin).await
    }
}
