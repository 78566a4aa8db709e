// src/config.rs

//! Manages server configuration: loading, defaults, and validation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The first port the listener tries to bind.
pub const DEFAULT_PORT: u16 = 31416;

/// The exclusive upper bound of the bind probe range.
pub const PORT_PROBE_END: u16 = 65535;

/// The PIN that applies whenever the persisted credential is absent or unreadable.
pub const DEFAULT_PIN: i32 = 1234;

/// The server's runtime configuration. All file paths are explicit; the server
/// never derives a path from the process environment.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// The address the listener binds to.
    pub host: String,
    /// The preferred listen port. If taken, every subsequent port up to (but
    /// not including) 65535 is probed.
    pub port: u16,
    /// The default log level, overridable via `RUST_LOG`.
    pub log_level: String,
    /// Path of the known-users file (`;`-separated usernames).
    pub users_path: String,
    /// Path of the admin PIN file (4 bytes, little-endian i32).
    pub pin_path: String,
    /// Path of the wait-queue snapshot file (one entry per line).
    pub queue_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            users_path: "users.txt".to_string(),
            pin_path: "pin.bin".to_string(),
            queue_path: "wait_queue.txt".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file. A missing file is not an
    /// error; it yields the built-in defaults.
    pub fn from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from '{path}'"))?;

        Ok(config)
    }
}
