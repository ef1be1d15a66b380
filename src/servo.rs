//! Servo actuation seam.

use tracing::debug;

use crate::channel::Channel;
use crate::error::RigResult;

/// Interface to the servo actuation hardware.
///
/// Abstracts the servo driver so the interpreter can be exercised against
/// a recording fake in tests and a tracing dry-run bank on the bench.
pub trait ServoBank {
    /// Bind a channel to its compiled-in output port.
    ///
    /// Called once per channel at start-up, before any angle command.
    fn attach(&mut self, channel: Channel) -> RigResult<()>;

    /// Command a channel's servo to an angle in degrees.
    fn write(&mut self, channel: Channel, angle: i32) -> RigResult<()>;
}

/// Servo bank that only logs commanded angles.
///
/// Useful for dry runs on a bench without actuation hardware attached:
/// every attach and write shows up as a `debug` trace event.
#[derive(Debug, Default)]
pub struct TraceServoBank;

impl ServoBank for TraceServoBank {
    fn attach(&mut self, channel: Channel) -> RigResult<()> {
        debug!("channel {} attached to port {}", channel, channel.port());
        Ok(())
    }

    fn write(&mut self, channel: Channel, angle: i32) -> RigResult<()> {
        debug!("channel {} -> {} deg", channel, angle);
        Ok(())
    }
}
