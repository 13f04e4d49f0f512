//! Data model for the process dashboard.
//!
//! [`ProcessView`] is the local record of one process's displayed state;
//! [`LogEntry`] is one immutable row of the append-only event log. Both are
//! plain data: protocol semantics (clock rules, queue ordering) live with
//! the driver, never here.

use chrono::Utc;

/// Process identifier. Ids are assigned `1..=N` at store construction and
/// never change for the lifetime of the program.
pub type ProcessId = u32;

/// Status label given to every process at initialization.
pub const DEFAULT_STATUS: &str = "Active";

/// Queue display string given to every process at initialization.
pub const EMPTY_QUEUE: &str = "[]";

// ── ProcessView ───────────────────────────────────────────────────────────────

/// Displayed state of a single process.
///
/// The status is a free-form label (the driver decides the vocabulary), the
/// timestamp is the latest Lamport clock value reported for the process, and
/// the queue snapshot is an opaque display string replaced wholesale on each
/// update. None of the three fields is validated here; the view shows what
/// the driver last reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessView {
    /// Unique process id in `1..=N`.
    pub id: ProcessId,
    /// Lifecycle label, e.g. `"Active"`, `"Failed"`, `"Recovered"`.
    pub status: String,
    /// Latest logical timestamp reported for this process.
    pub last_timestamp: u64,
    /// Formatted pending-request queue, e.g. `"[]"` or `"[P1@3, P2@5]"`.
    pub queue_snapshot: String,
}

impl ProcessView {
    /// A fresh view in the initial display state: `"Active"`, timestamp 0,
    /// empty queue.
    pub fn new(id: ProcessId) -> Self {
        Self {
            id,
            status: DEFAULT_STATUS.to_string(),
            last_timestamp: 0,
            queue_snapshot: EMPTY_QUEUE.to_string(),
        }
    }
}

// ── LogEntry ──────────────────────────────────────────────────────────────────

/// One row of the event log.
///
/// The timestamp is wall-clock milliseconds since the Unix epoch, assigned
/// when the entry is appended. It is display metadata, not the logical
/// clock; collisions and out-of-order stamps under producer races are
/// tolerated because insertion order is what the log preserves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Wall-clock append time in milliseconds since the epoch.
    pub timestamp_ms: i64,
    /// Free-form message text, displayed verbatim (empty is valid).
    pub message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current wall-clock time.
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp_ms: Utc::now().timestamp_millis(),
            message: message.into(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── ProcessView ───────────────────────────────────────────────────────

    #[test]
    fn test_process_view_initial_state() {
        let view = ProcessView::new(3);
        assert_eq!(view.id, 3);
        assert_eq!(view.status, "Active");
        assert_eq!(view.last_timestamp, 0);
        assert_eq!(view.queue_snapshot, "[]");
    }

    #[test]
    fn test_process_view_fields_are_independent() {
        let mut view = ProcessView::new(1);
        view.status = "Failed".to_string();
        assert_eq!(view.last_timestamp, 0, "status update must not touch the timestamp");
        assert_eq!(view.queue_snapshot, "[]", "status update must not touch the queue");
    }

    // ── LogEntry ──────────────────────────────────────────────────────────

    #[test]
    fn test_log_entry_now_stamps_wall_clock() {
        let before = Utc::now().timestamp_millis();
        let entry = LogEntry::now("Process 1 entered critical section");
        let after = Utc::now().timestamp_millis();

        assert!(entry.timestamp_ms >= before && entry.timestamp_ms <= after);
        assert_eq!(entry.message, "Process 1 entered critical section");
    }

    #[test]
    fn test_log_entry_empty_message_is_valid() {
        let entry = LogEntry::now("");
        assert_eq!(entry.message, "");
    }
}
