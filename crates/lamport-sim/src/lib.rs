//! Simulated Lamport mutual-exclusion driver for lamport-watch.
//!
//! Spawns one OS thread per process. Each actor keeps its own Lamport
//! clock, arbitrates critical-section entry through a shared
//! timestamp-ordered request queue, occasionally fails and recovers, and
//! reports every transition through the [`StateStore`] update API. The
//! dashboard never depends on this crate: it is a producer of display
//! traffic, exercising the store exactly the way an external protocol
//! implementation would.
//!
//! [`StateStore`]: lamport_runtime::store::StateStore

pub mod actor;
pub mod queue;

pub use actor::{Simulation, SimulationConfig, SimulationHandle};

pub use lamport_runtime as runtime;
