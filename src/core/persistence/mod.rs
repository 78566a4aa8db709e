// src/core/persistence/mod.rs

//! Flat-file persistence: the known-user list, the admin PIN, and the
//! wait-queue snapshot.
//!
//! None of these are durable logs. Users are loaded once at startup, the PIN
//! is rewritten whole on change, and the queue snapshot is overwritten whole
//! at shutdown and read back whole at the next startup.

use crate::core::ShiftError;
use crate::core::state::QueueEntry;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Loads the known-user list: the entire file contents split on `;`. A
/// missing or unreadable file yields an empty list; entries are not
/// validated.
pub async fn load_users(path: &Path) -> Vec<String> {
    match fs::read_to_string(path).await {
        Ok(contents) => contents.split(';').map(str::to_string).collect(),
        Err(e) => {
            debug!("Known-users file {:?} not loaded: {}", path, e);
            Vec::new()
        }
    }
}

/// Loads the persisted admin PIN: exactly 4 bytes decoded as a little-endian
/// signed 32-bit integer. Any absence, short read, or IO failure yields
/// `None`; callers map that to the default PIN.
pub async fn load_pin(path: &Path) -> Option<i32> {
    match fs::read(path).await {
        Ok(bytes) => {
            let raw: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
            Some(i32::from_le_bytes(raw))
        }
        Err(e) => {
            debug!("PIN file {:?} not loaded: {}", path, e);
            None
        }
    }
}

/// Persists the admin PIN as its 4-byte little-endian encoding, overwriting
/// the file.
pub async fn save_pin(path: &Path, pin: i32) -> Result<(), ShiftError> {
    fs::write(path, pin.to_le_bytes())
        .await
        .map_err(|e| ShiftError::Persistence(format!("failed to write PIN file: {e}")))
}

/// Restores the wait queue from its snapshot file, one entry per line. A
/// missing file yields an empty queue; malformed lines load as bare
/// usernames.
pub async fn load_queue(path: &Path) -> Vec<QueueEntry> {
    match fs::read_to_string(path).await {
        Ok(contents) => contents.lines().map(QueueEntry::parse).collect(),
        Err(e) => {
            debug!("Queue snapshot {:?} not loaded: {}", path, e);
            Vec::new()
        }
    }
}

/// Overwrites the snapshot file with the given entries, one display string
/// per line.
pub async fn save_queue(path: &Path, entries: &[QueueEntry]) -> Result<(), ShiftError> {
    let mut contents = entries
        .iter()
        .map(QueueEntry::display)
        .collect::<Vec<_>>()
        .join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    fs::write(path, contents)
        .await
        .map_err(|e| ShiftError::Persistence(format!("failed to write queue snapshot: {e}")))
}

/// Snapshots the current queue, logging instead of propagating on failure.
/// Used on the shutdown paths, where a failed save must never abort the
/// shutdown itself.
pub async fn save_queue_best_effort(path: &Path, entries: &[QueueEntry]) {
    if let Err(e) = save_queue(path, entries).await {
        warn!("Queue snapshot failed: {}", e);
    }
}
