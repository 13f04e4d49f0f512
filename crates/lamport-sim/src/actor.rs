//! Simulated protocol actors and the thread pool driving them.
//!
//! [`Simulation::spawn`] starts one OS thread per process. Each
//! [`ProcessActor`] is a small state machine ticked on a fixed step: it
//! advances its Lamport clock, requests the critical section through the
//! shared [`RequestQueue`], enters when its request reaches the head, exits
//! after a short hold, and occasionally fails and recovers. Every
//! transition is reported through the [`StateStore`] API from the actor's
//! own thread, so the store sees genuinely concurrent producers.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use lamport_core::models::ProcessId;
use lamport_runtime::store::StateStore;

use crate::queue::RequestQueue;

// ── SimulationConfig ──────────────────────────────────────────────────────────

/// Tunables for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of simulated processes (ids `1..=processes`).
    pub processes: u32,
    /// Pause between actor ticks.
    pub step: Duration,
    /// Per-tick probability that a live process fails.
    pub failure_chance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            processes: 5,
            step: Duration::from_millis(500),
            failure_chance: 0.05,
        }
    }
}

// ── ProcessActor ──────────────────────────────────────────────────────────────

/// Per-tick probability that an idle process requests the critical section.
const REQUEST_CHANCE: f64 = 0.4;

/// Per-tick probability that an idle process emits a heartbeat log line.
const HEARTBEAT_CHANCE: f64 = 0.2;

/// Lifecycle phase of one simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Waiting,
    InCritical,
    Down,
}

/// One simulated process.
///
/// The tick logic lives in [`ProcessActor::step`] with no sleeping or
/// thread handling, so tests can drive it deterministically with a seeded
/// RNG.
pub struct ProcessActor {
    id: ProcessId,
    clock: u64,
    phase: Phase,
    /// Timestamp of the outstanding request while `Waiting` / `InCritical`.
    request_ts: Option<u64>,
    hold_ticks: u32,
    down_ticks: u32,
    rng: SmallRng,
    store: Arc<StateStore>,
    queue: Arc<RequestQueue>,
    failure_chance: f64,
}

impl ProcessActor {
    pub fn new(
        id: ProcessId,
        store: Arc<StateStore>,
        queue: Arc<RequestQueue>,
        failure_chance: f64,
        seed: u64,
    ) -> Self {
        Self {
            id,
            clock: 0,
            phase: Phase::Idle,
            request_ts: None,
            hold_ticks: 0,
            down_ticks: 0,
            rng: SmallRng::seed_from_u64(seed),
            store,
            queue,
            failure_chance,
        }
    }

    /// Run one tick of the state machine and report the results.
    pub fn step(&mut self) {
        self.advance_clock();

        match self.phase {
            Phase::Down => {
                self.down_ticks = self.down_ticks.saturating_sub(1);
                if self.down_ticks == 0 {
                    self.recover();
                }
            }
            Phase::Idle => {
                if self.rng.gen_bool(self.failure_chance) {
                    self.fail();
                } else if self.rng.gen_bool(REQUEST_CHANCE) {
                    self.request();
                } else if self.rng.gen_bool(HEARTBEAT_CHANCE) {
                    self.store
                        .append_log(format!("Process {} heartbeat", self.id));
                }
            }
            Phase::Waiting => {
                if self.rng.gen_bool(self.failure_chance) {
                    self.fail();
                } else if self.head_is_mine() {
                    self.enter();
                }
            }
            Phase::InCritical => {
                self.hold_ticks = self.hold_ticks.saturating_sub(1);
                if self.hold_ticks == 0 {
                    self.exit();
                }
            }
        }

        self.store.set_queue_snapshot(self.id, self.queue.snapshot());
    }

    /// Advance the local clock by one internal event, first merging in the
    /// highest timestamp visible in the shared queue (the receive rule).
    fn advance_clock(&mut self) {
        let seen = self.queue.max_timestamp().unwrap_or(0);
        self.clock = self.clock.max(seen) + 1;
        self.store.set_timestamp(self.id, self.clock);
    }

    fn head_is_mine(&self) -> bool {
        match self.request_ts {
            Some(ts) => self.queue.head() == Some((ts, self.id)),
            None => false,
        }
    }

    fn request(&mut self) {
        self.request_ts = Some(self.clock);
        self.queue.insert(self.clock, self.id);
        self.store.set_status(self.id, "Waiting");
        self.store
            .append_log(format!("Process {} requested the critical section", self.id));
        self.phase = Phase::Waiting;
    }

    fn enter(&mut self) {
        self.hold_ticks = self.rng.gen_range(1..=3);
        self.store.set_status(self.id, "In CS");
        self.store
            .append_log(format!("Process {} entered critical section", self.id));
        self.phase = Phase::InCritical;
    }

    fn exit(&mut self) {
        if let Some(ts) = self.request_ts.take() {
            self.queue.remove(ts, self.id);
        }
        self.store.set_status(self.id, "Active");
        self.store
            .append_log(format!("Process {} exited critical section", self.id));
        self.phase = Phase::Idle;
    }

    fn fail(&mut self) {
        self.down_ticks = self.rng.gen_range(2..=5);
        // A failed process abandons its request so the others can proceed.
        self.queue.remove_all(self.id);
        self.request_ts = None;
        self.store.set_status(self.id, "Failed");
        self.store.append_log(format!("Process {} failed", self.id));
        self.phase = Phase::Down;
    }

    fn recover(&mut self) {
        self.store.set_status(self.id, "Recovered");
        self.store
            .append_log(format!("Process {} recovered", self.id));
        self.phase = Phase::Idle;
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// Entry point for spawning the actor threads.
pub struct Simulation;

impl Simulation {
    /// Spawn one named thread per process. Returns a handle used to stop
    /// and join them.
    pub fn spawn(config: SimulationConfig, store: Arc<StateStore>) -> io::Result<SimulationHandle> {
        let stop = Arc::new(AtomicBool::new(false));
        let queue = Arc::new(RequestQueue::new());

        let mut threads = Vec::with_capacity(config.processes as usize);
        for id in 1..=config.processes {
            let store = Arc::clone(&store);
            let queue = Arc::clone(&queue);
            let stop = Arc::clone(&stop);
            let step = config.step;
            let failure_chance = config.failure_chance;
            let seed = rand::random::<u64>();

            let handle = std::thread::Builder::new()
                .name(format!("process-{id}"))
                .spawn(move || {
                    tracing::debug!(id, "actor thread started");
                    let mut actor = ProcessActor::new(id, store, queue, failure_chance, seed);
                    while !stop.load(Ordering::Relaxed) {
                        actor.step();
                        std::thread::sleep(step);
                    }
                    tracing::debug!(id, "actor thread stopped");
                })?;
            threads.push(handle);
        }

        Ok(SimulationHandle { stop, threads })
    }
}

/// Handle to a running simulation.
pub struct SimulationHandle {
    stop: Arc<AtomicBool>,
    threads: Vec<JoinHandle<()>>,
}

impl SimulationHandle {
    /// Signal every actor to stop and wait for their threads to finish.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        for handle in self.threads.drain(..) {
            let _ = handle.join();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn log_messages(store: &StateStore) -> Vec<String> {
        store.log_entries().into_iter().map(|e| e.message).collect()
    }

    // ── Single-actor behavior ─────────────────────────────────────────────

    #[test]
    fn test_actor_eventually_enters_and_exits() {
        let (store, _rx) = StateStore::new(1);
        let queue = Arc::new(RequestQueue::new());
        let mut actor = ProcessActor::new(1, Arc::clone(&store), queue, 0.0, 7);

        for _ in 0..500 {
            actor.step();
        }

        let log = log_messages(&store).join("\n");
        assert!(log.contains("requested the critical section"));
        assert!(log.contains("entered critical section"));
        assert!(log.contains("exited critical section"));
    }

    #[test]
    fn test_actor_timestamps_are_monotonic() {
        let (store, _rx) = StateStore::new(1);
        let queue = Arc::new(RequestQueue::new());
        let mut actor = ProcessActor::new(1, Arc::clone(&store), queue, 0.0, 11);

        let mut last = 0;
        for _ in 0..100 {
            actor.step();
            let now = store.view(1).unwrap().last_timestamp;
            assert!(now > last, "clock must strictly advance each tick");
            last = now;
        }
    }

    #[test]
    fn test_actor_failure_and_recovery_cycle() {
        let (store, _rx) = StateStore::new(1);
        let queue = Arc::new(RequestQueue::new());
        // failure_chance 1.0: the first tick fails, then the actor sits out
        // its down period (at most 5 ticks) and recovers.
        let mut actor = ProcessActor::new(1, Arc::clone(&store), Arc::clone(&queue), 1.0, 3);

        for _ in 0..10 {
            actor.step();
        }

        let log = log_messages(&store).join("\n");
        assert!(log.contains("Process 1 failed"));
        assert!(log.contains("Process 1 recovered"));
        assert!(queue.is_empty(), "a failed process abandons its requests");
    }

    #[test]
    fn test_actor_updates_queue_snapshot_every_tick() {
        let (store, _rx) = StateStore::new(1);
        let queue = Arc::new(RequestQueue::new());
        let mut actor = ProcessActor::new(1, Arc::clone(&store), Arc::clone(&queue), 0.0, 5);

        actor.step();
        assert_eq!(
            store.view(1).unwrap().queue_snapshot,
            queue.snapshot(),
            "displayed snapshot must match the shared queue"
        );
    }

    // ── Two actors: mutual exclusion over the shared queue ────────────────

    #[test]
    fn test_two_actors_never_hold_the_section_together() {
        let (store, _rx) = StateStore::new(2);
        let queue = Arc::new(RequestQueue::new());
        let mut a = ProcessActor::new(1, Arc::clone(&store), Arc::clone(&queue), 0.0, 17);
        let mut b = ProcessActor::new(2, Arc::clone(&store), Arc::clone(&queue), 0.0, 23);

        for _ in 0..300 {
            a.step();
            b.step();
            let holders = store
                .views()
                .iter()
                .filter(|v| v.status == "In CS")
                .count();
            assert!(holders <= 1, "at most one process may hold the section");
        }
    }

    // ── Simulation thread pool ────────────────────────────────────────────

    #[test]
    fn test_simulation_spawn_and_stop() {
        let (store, _rx) = StateStore::new(3);
        let config = SimulationConfig {
            processes: 3,
            step: Duration::from_millis(10),
            failure_chance: 0.0,
        };

        let handle = Simulation::spawn(config, Arc::clone(&store)).expect("spawn");
        std::thread::sleep(Duration::from_millis(100));
        handle.stop();

        // Every actor ticked at least once: the first tick always reports a
        // timestamp greater than the initial zero.
        for id in 1..=3 {
            assert!(store.view(id).unwrap().last_timestamp > 0);
        }
    }
}
