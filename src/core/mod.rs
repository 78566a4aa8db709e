// src/core/mod.rs

//! The core of the server: shared state, the command engine, persistence,
//! and the error taxonomy.

pub mod commands;
pub mod errors;
pub mod persistence;
pub mod state;

pub use errors::ShiftError;
