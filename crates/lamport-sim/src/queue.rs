//! Shared pending-request queue for the simulated protocol.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use lamport_core::models::ProcessId;

/// One pending critical-section request: logical timestamp, then process id.
///
/// The derived tuple ordering is the protocol's total order: lower
/// timestamps win and ties break toward the lower process id.
pub type Request = (u64, ProcessId);

/// Timestamp-ordered set of outstanding critical-section requests, shared
/// by all simulated processes.
#[derive(Debug, Default)]
pub struct RequestQueue {
    inner: Mutex<BTreeSet<Request>>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request to the queue.
    pub fn insert(&self, timestamp: u64, id: ProcessId) {
        self.lock().insert((timestamp, id));
    }

    /// Remove one specific request.
    pub fn remove(&self, timestamp: u64, id: ProcessId) {
        self.lock().remove(&(timestamp, id));
    }

    /// Remove every request owned by `id` (used when a process fails).
    pub fn remove_all(&self, id: ProcessId) {
        self.lock().retain(|&(_, owner)| owner != id);
    }

    /// The request with the highest priority (lowest timestamp, then id).
    pub fn head(&self) -> Option<Request> {
        self.lock().iter().next().copied()
    }

    /// Highest timestamp currently queued, for Lamport clock merging.
    pub fn max_timestamp(&self) -> Option<u64> {
        self.lock().iter().next_back().map(|&(ts, _)| ts)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Render the queue as the opaque display string shown in the Queue
    /// column: `"[]"`, `"[P1@3, P2@5]"`.
    pub fn snapshot(&self) -> String {
        let inner = self.lock();
        if inner.is_empty() {
            return "[]".to_string();
        }
        let items: Vec<String> = inner
            .iter()
            .map(|(ts, id)| format!("P{id}@{ts}"))
            .collect();
        format!("[{}]", items.join(", "))
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<Request>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_is_lowest_timestamp() {
        let queue = RequestQueue::new();
        queue.insert(7, 1);
        queue.insert(3, 2);
        queue.insert(5, 3);
        assert_eq!(queue.head(), Some((3, 2)));
    }

    #[test]
    fn test_ties_break_toward_lower_id() {
        let queue = RequestQueue::new();
        queue.insert(4, 3);
        queue.insert(4, 1);
        assert_eq!(queue.head(), Some((4, 1)));
    }

    #[test]
    fn test_remove_specific_request() {
        let queue = RequestQueue::new();
        queue.insert(3, 1);
        queue.insert(5, 2);
        queue.remove(3, 1);
        assert_eq!(queue.head(), Some((5, 2)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_remove_all_clears_only_one_owner() {
        let queue = RequestQueue::new();
        queue.insert(3, 1);
        queue.insert(5, 1);
        queue.insert(4, 2);
        queue.remove_all(1);
        assert_eq!(queue.head(), Some((4, 2)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_max_timestamp() {
        let queue = RequestQueue::new();
        assert_eq!(queue.max_timestamp(), None);
        queue.insert(3, 1);
        queue.insert(9, 2);
        assert_eq!(queue.max_timestamp(), Some(9));
    }

    #[test]
    fn test_snapshot_format() {
        let queue = RequestQueue::new();
        assert_eq!(queue.snapshot(), "[]");

        queue.insert(5, 2);
        queue.insert(3, 1);
        // Ordered by priority, not insertion.
        assert_eq!(queue.snapshot(), "[P1@3, P2@5]");
    }
}
