//! Run-wide output dataset for accepted detections.
//!
//! The dataset is the only state shared across concurrent event workers,
//! together with the run-wide detection counter. Rows accumulate for the
//! whole run in acceptance order; finalization and physical storage are the
//! engine's responsibility.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// One accepted detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionRow {
    /// Event the detection belongs to.
    pub event_id: u64,
    /// Photon wavelength in nanometers.
    pub wavelength_nm: f64,
    /// Absolute simulation time at the start of the detecting step.
    pub arrival_time: f64,
}

/// Append-only, concurrency-safe sink for accepted detections.
///
/// Implementations must make each append atomic as a unit (no interleaved or
/// partial rows) and keep rows in acceptance order. No deduplication, no
/// in-place update, no deletion.
pub trait DetectionSink: Send + Sync {
    /// Appends one row and increments the run-wide detection counter.
    ///
    /// Returns the detection number: 1-based, monotonically increasing over
    /// the run (never reset per event).
    fn append(&self, row: DetectionRow) -> u64;

    /// Number of detections accepted so far in this run.
    fn detection_count(&self) -> u64;
}

/// In-memory [`DetectionSink`] holding the whole run's rows.
#[derive(Debug, Default)]
pub struct DetectionTable {
    rows: Mutex<Vec<DetectionRow>>,
    detections: AtomicU64,
}

impl DetectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows appended so far.
    pub fn len(&self) -> usize {
        self.lock_rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all rows in acceptance order.
    pub fn rows(&self) -> Vec<DetectionRow> {
        self.lock_rows().clone()
    }

    /// Consumes the table, returning the rows in acceptance order.
    pub fn into_rows(self) -> Vec<DetectionRow> {
        self.rows
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_rows(&self) -> std::sync::MutexGuard<'_, Vec<DetectionRow>> {
        // Each push is atomic under the lock, so a poisoned lock still
        // guards a consistent row vector.
        self.rows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DetectionSink for DetectionTable {
    fn append(&self, row: DetectionRow) -> u64 {
        let mut rows = self.lock_rows();
        rows.push(row);
        self.detections.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn detection_count(&self) -> u64 {
        self.detections.load(Ordering::Relaxed)
    }
}
