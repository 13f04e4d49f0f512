//! Terminal UI layer for lamport-watch.
//!
//! Provides themes, the dashboard header, the per-process table, the
//! color-coded event log view, and the main application event loop built on
//! top of [`ratatui`]. This crate is the only place that touches the
//! rendering surface; everything else talks to it through render requests.

pub mod app;
pub mod components;
pub mod log_view;
pub mod process_table;
pub mod themes;

pub use lamport_core as core;
