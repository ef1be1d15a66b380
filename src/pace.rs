//! Blocking delay seam.

use std::time::Duration;

/// Blocking delay primitive used to pace servo motion.
///
/// Every rig delay is a synchronous sleep: while a pause is in progress no
/// input is read and no other channel moves.
pub trait Pacer {
    /// Block for the given duration.
    fn pause(&mut self, duration: Duration);
}

/// Pacer backed by [`std::thread::sleep`].
#[derive(Debug, Default)]
pub struct SystemPacer;

impl Pacer for SystemPacer {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
