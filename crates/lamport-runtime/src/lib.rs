//! Runtime layer for lamport-watch.
//!
//! Owns the concurrent [`store::StateStore`] and the render-request channel
//! that marshals updates from producer threads to the single render loop.

pub mod store;

pub use store::{RenderRequest, StateStore};

pub use lamport_core as core;
