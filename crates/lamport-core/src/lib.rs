//! Core domain layer for lamport-watch.
//!
//! Holds the data model shared by the store and the UI (process views, log
//! entries), the pure log-row classification rule, formatting and timezone
//! helpers, CLI settings with last-used persistence, and the error taxonomy.

pub mod classify;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
