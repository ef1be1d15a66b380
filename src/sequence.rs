//! Append-only recording of servo position snapshots.
//!
//! The sequence log backs the save/play/reset commands: each save captures
//! the full four-channel angle vector as one snapshot, and playback walks
//! the recorded snapshots oldest first. Storage is a fixed-size array;
//! clearing the log only resets the logical length, so stale entries stay
//! in place but are never observable.

use crate::channel::CHANNEL_COUNT;
use crate::error::{RigError, RigResult};

/// Maximum number of snapshots the log can hold.
pub const SEQUENCE_CAPACITY: usize = 16;

/// One recorded position: an angle per channel, in channel index order.
pub type Snapshot = [i32; CHANNEL_COUNT];

/// Fixed-capacity, append-only log of position snapshots.
#[derive(Debug)]
pub struct SequenceLog {
    snapshots: [Snapshot; SEQUENCE_CAPACITY],
    len: usize,
}

impl SequenceLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            snapshots: [[0; CHANNEL_COUNT]; SEQUENCE_CAPACITY],
            len: 0,
        }
    }

    /// Append a snapshot and return the new count of recorded positions.
    ///
    /// Once the backing store is exhausted the snapshot is rejected with
    /// [`RigError::SequenceFull`] and the count is unchanged.
    pub fn record(&mut self, snapshot: Snapshot) -> RigResult<usize> {
        if self.len == SEQUENCE_CAPACITY {
            return Err(RigError::SequenceFull {
                capacity: SEQUENCE_CAPACITY,
            });
        }
        self.snapshots[self.len] = snapshot;
        self.len += 1;
        Ok(self.len)
    }

    /// Number of recorded positions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the log holds no positions.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discard all recorded positions.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Recorded snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots[..self.len]
    }
}

impl Default for SequenceLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_returns_running_count() {
        let mut log = SequenceLog::new();
        assert!(log.is_empty());

        assert_eq!(log.record([90, 90, 140, 0]).unwrap(), 1);
        assert_eq!(log.record([90, 90, 140, 0]).unwrap(), 2);
        assert_eq!(log.record([10, 20, 30, 40]).unwrap(), 3);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_snapshots_in_record_order() {
        let mut log = SequenceLog::new();
        log.record([1, 2, 3, 4]).unwrap();
        log.record([5, 6, 7, 8]).unwrap();

        assert_eq!(log.snapshots(), &[[1, 2, 3, 4], [5, 6, 7, 8]]);
    }

    #[test]
    fn test_record_rejects_when_full() {
        let mut log = SequenceLog::new();
        for _ in 0..SEQUENCE_CAPACITY {
            log.record([0, 0, 0, 0]).unwrap();
        }

        let err = log.record([1, 1, 1, 1]).unwrap_err();
        match err {
            RigError::SequenceFull { capacity } => assert_eq!(capacity, SEQUENCE_CAPACITY),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(log.len(), SEQUENCE_CAPACITY);
    }

    #[test]
    fn test_clear_resets_count_only() {
        let mut log = SequenceLog::new();
        log.record([1, 2, 3, 4]).unwrap();
        log.record([5, 6, 7, 8]).unwrap();

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.snapshots(), &[] as &[Snapshot]);
    }

    #[test]
    fn test_record_after_clear_overwrites_from_start() {
        let mut log = SequenceLog::new();
        log.record([1, 1, 1, 1]).unwrap();
        log.clear();

        assert_eq!(log.record([9, 9, 9, 9]).unwrap(), 1);
        assert_eq!(log.snapshots(), &[[9, 9, 9, 9]]);
    }
}
