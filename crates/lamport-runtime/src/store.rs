//! Concurrent state store and render-request marshaling.
//!
//! [`StateStore`] is the single source of truth for per-process display
//! state and the append-only event log, safe to mutate from any thread.
//! Every mutation updates the canonical copy under a lock and forwards one
//! self-contained [`RenderRequest`] through an unbounded `mpsc` channel to
//! the render loop, which owns all visual state. Producers enqueue and
//! return immediately; nothing on this path can block or fail them.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use lamport_core::models::{LogEntry, ProcessId, ProcessView};

// ── RenderRequest ─────────────────────────────────────────────────────────────

/// A single marshaled render instruction.
///
/// This is the primary data contract between producer threads and the
/// render loop. Each request carries the new value for exactly one visual
/// element, so the consumer never reaches back into shared state while
/// drawing, and requests for the same element coalesce to last-write-wins
/// before the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRequest {
    /// Update the status label of one process.
    Status { id: ProcessId, status: String },
    /// Update the logical-timestamp display of one process.
    Timestamp { id: ProcessId, value: u64 },
    /// Replace the queue display string of one process.
    Queue { id: ProcessId, snapshot: String },
    /// Append one row to the event log.
    LogRow(LogEntry),
    /// Reset the whole dashboard to `total` fresh process views.
    Reset { total: u32 },
}

// ── StateStore ────────────────────────────────────────────────────────────────

struct StoreInner {
    views: Vec<ProcessView>,
    log: Vec<LogEntry>,
}

/// Thread-safe aggregation point for all process state updates.
///
/// Construct with [`StateStore::new`], hand the `Arc` to every producer,
/// and feed the returned receiver to the render loop. All update methods
/// are fire-and-forget: an unknown process id drops the update with a
/// debug-level trace, and a closed render channel is tolerated (the
/// canonical state still updates, so late readers see current values).
pub struct StateStore {
    inner: Mutex<StoreInner>,
    tx: mpsc::UnboundedSender<RenderRequest>,
}

impl StateStore {
    /// Create a store holding `total` process views (ids `1..=total`, status
    /// `"Active"`, timestamp 0, empty queue) and return it together with the
    /// render-request receiver.
    pub fn new(total: u32) -> (Arc<Self>, mpsc::UnboundedReceiver<RenderRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Arc::new(Self {
            inner: Mutex::new(StoreInner {
                views: fresh_views(total),
                log: Vec::new(),
            }),
            tx,
        });
        (store, rx)
    }

    // ── Mutation entry points ─────────────────────────────────────────────

    /// Reset to `total` fresh process views and clear the log.
    pub fn initialize(&self, total: u32) {
        let mut inner = self.lock();
        inner.views = fresh_views(total);
        inner.log.clear();
        self.forward(RenderRequest::Reset { total });
    }

    /// Update the status label of process `id`.
    pub fn set_status(&self, id: ProcessId, status: impl Into<String>) {
        let status = status.into();
        let mut inner = self.lock();
        match view_mut(&mut inner.views, id) {
            Some(view) => {
                view.status = status.clone();
                self.forward(RenderRequest::Status { id, status });
            }
            None => tracing::debug!(id, "status update for unknown process dropped"),
        }
    }

    /// Update the latest logical timestamp of process `id`.
    ///
    /// Any value is accepted; monotonicity is the driver's contract, not
    /// enforced here.
    pub fn set_timestamp(&self, id: ProcessId, value: u64) {
        let mut inner = self.lock();
        match view_mut(&mut inner.views, id) {
            Some(view) => {
                view.last_timestamp = value;
                self.forward(RenderRequest::Timestamp { id, value });
            }
            None => tracing::debug!(id, "timestamp update for unknown process dropped"),
        }
    }

    /// Replace the queue display string of process `id` wholesale.
    pub fn set_queue_snapshot(&self, id: ProcessId, snapshot: impl Into<String>) {
        let snapshot = snapshot.into();
        let mut inner = self.lock();
        match view_mut(&mut inner.views, id) {
            Some(view) => {
                view.queue_snapshot = snapshot.clone();
                self.forward(RenderRequest::Queue { id, snapshot });
            }
            None => tracing::debug!(id, "queue update for unknown process dropped"),
        }
    }

    /// Append a log entry stamped with the current wall-clock time.
    ///
    /// The send happens while the lock is held, so the channel carries rows
    /// in canonical insertion order even under concurrent callers.
    pub fn append_log(&self, message: impl Into<String>) {
        let entry = LogEntry::now(message);
        let mut inner = self.lock();
        inner.log.push(entry.clone());
        self.forward(RenderRequest::LogRow(entry));
    }

    // ── Read hooks ────────────────────────────────────────────────────────

    /// Number of process views currently held.
    pub fn process_count(&self) -> usize {
        self.lock().views.len()
    }

    /// Snapshot of one process view, or `None` for an unknown id.
    pub fn view(&self, id: ProcessId) -> Option<ProcessView> {
        let inner = self.lock();
        if id == 0 {
            return None;
        }
        inner.views.get(id as usize - 1).cloned()
    }

    /// Snapshot of all process views in id order.
    pub fn views(&self) -> Vec<ProcessView> {
        self.lock().views.clone()
    }

    /// Current log length.
    pub fn log_len(&self) -> usize {
        self.lock().log.len()
    }

    /// Snapshot of the full log in insertion order.
    pub fn log_entries(&self) -> Vec<LogEntry> {
        self.lock().log.clone()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Lock the canonical state, recovering from poisoning: a producer that
    /// panicked mid-update must not take the whole dashboard down with it.
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Forward a request to the render loop, tolerating its absence.
    fn forward(&self, request: RenderRequest) {
        if self.tx.send(request).is_err() {
            tracing::debug!("render loop gone; dropping render request");
        }
    }
}

fn fresh_views(total: u32) -> Vec<ProcessView> {
    (1..=total).map(ProcessView::new).collect()
}

fn view_mut(views: &mut [ProcessView], id: ProcessId) -> Option<&mut ProcessView> {
    if id == 0 {
        return None;
    }
    views.get_mut(id as usize - 1)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
