//! Command interpreter and position sequencing.
//!
//! The interpreter is a single-threaded polling loop: each iteration
//! checks the command source for a ready byte, consumes it, and
//! dispatches. Angle-change commands read a following integer token from
//! the same stream. All pacing is done with blocking delays, so a command
//! runs to completion (including every internal pause) before the next
//! byte is polled — an in-progress move or replay cannot be interrupted.
//!
//! # Command set
//!
//! Single ASCII bytes, case-sensitive:
//!
//! | Byte | Action |
//! |------|--------|
//! | `S`  | Record the current four-channel angle vector as a snapshot |
//! | `P`  | Replay every recorded snapshot, oldest first |
//! | `R`  | Discard all recorded snapshots |
//! | `A`–`D` | Read an integer target and sweep that channel to it |
//! | `E`  | Defined as doing nothing |
//! | other | Reported as `Command unknown.` |
//!
//! # Status output
//!
//! Human-readable status lines are the device's output protocol, not
//! diagnostics: they go to the interpreter's sink (stdout in the binary)
//! with fixed templates, one line per handled command. Internal events are
//! additionally traced at `debug`/`warn` level.

use std::io::Write;
use std::time::Duration;

use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::channel::{Channel, CHANNEL_COUNT, DEFAULT_ANGLES};
use crate::error::{RigError, RigResult};
use crate::pace::Pacer;
use crate::sequence::SequenceLog;
use crate::servo::ServoBank;
use crate::source::{CommandSource, InputStatus};

/// Delay between unit steps of a smooth move.
const STEP_DELAY: Duration = Duration::from_millis(10);

/// Delay after each replayed channel write.
const REPLAY_STEP_DELAY: Duration = Duration::from_millis(500);

/// Settle time after recording a position.
const SAVE_SETTLE: Duration = Duration::from_millis(1500);

/// Settle time after replaying the full sequence.
const REPLAY_SETTLE: Duration = Duration::from_millis(2000);

/// Settle time after attaching and centering one servo at start-up.
const ATTACH_SETTLE: Duration = Duration::from_millis(200);

/// Wait between polls of an idle input stream.
const POLL_DELAY: Duration = Duration::from_millis(1);

/// Command interpreter for the four-servo rig.
///
/// Owns the tracked angle vector and the sequence log; the command
/// source, servo bank, pacing primitive and status sink are injected so
/// the whole control loop can run against fakes.
pub struct Interpreter<S, B, P, W> {
    source: S,
    servos: B,
    pacer: P,
    out: W,
    angles: [i32; CHANNEL_COUNT],
    log: SequenceLog,
}

impl<S, B, P, W> Interpreter<S, B, P, W>
where
    S: CommandSource,
    B: ServoBank,
    P: Pacer,
    W: Write,
{
    /// Create an interpreter with every channel at its default angle.
    pub fn new(source: S, servos: B, pacer: P, out: W) -> Self {
        Self {
            source,
            servos,
            pacer,
            out,
            angles: DEFAULT_ANGLES,
            log: SequenceLog::new(),
        }
    }

    /// Attach every servo and drive it to its default angle.
    ///
    /// Must run once before [`run`](Self::run); ends by reporting the
    /// initial state on the status sink.
    pub fn start(&mut self) -> RigResult<()> {
        for channel in Channel::iter() {
            self.servos.attach(channel)?;
            self.servos.write(channel, channel.default_angle())?;
            self.pacer.pause(ATTACH_SETTLE);
        }
        self.report_state()
    }

    /// Poll and dispatch commands until the source closes.
    ///
    /// A serial source never closes, so on hardware this runs for the
    /// lifetime of the process.
    pub fn run(&mut self) -> RigResult<()> {
        loop {
            match self.source.available()? {
                InputStatus::Ready => self.poll_once()?,
                InputStatus::Empty => self.pacer.pause(POLL_DELAY),
                InputStatus::Closed => return Ok(()),
            }
        }
    }

    /// Consume and dispatch a single command byte.
    pub fn poll_once(&mut self) -> RigResult<()> {
        let command = self.source.read_byte()?;
        writeln!(self.out, "Received command: {}", command as char)?;
        self.dispatch(command)
    }

    fn dispatch(&mut self, command: u8) -> RigResult<()> {
        debug!("dispatching command byte 0x{command:02X}");
        match command {
            b'S' => self.save_position(),
            b'P' => self.replay_sequence(),
            b'R' => self.clear_sequence(),
            // 'E' is defined as doing nothing.
            b'E' => Ok(()),
            _ => match Channel::from_command_byte(command) {
                Some(channel) => self.move_channel(channel),
                None => {
                    writeln!(self.out, "Command unknown.")?;
                    Ok(())
                }
            },
        }
    }

    /// Record the current angle vector as a new snapshot.
    fn save_position(&mut self) -> RigResult<()> {
        match self.log.record(self.angles) {
            Ok(count) => {
                writeln!(self.out, "Position {count} saved")?;
                self.pacer.pause(SAVE_SETTLE);
                Ok(())
            }
            Err(RigError::SequenceFull { capacity }) => {
                warn!("sequence log full at {capacity} positions, snapshot dropped");
                writeln!(self.out, "Sequence full, position not saved")?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Replay every recorded snapshot, oldest first.
    ///
    /// Each snapshot is applied channel by channel in index order, with a
    /// pause after every write. The tracked angle vector is not touched:
    /// only angle-change commands update it.
    fn replay_sequence(&mut self) -> RigResult<()> {
        let count = self.log.len();
        for i in 0..count {
            let snapshot = self.log.snapshots()[i];
            for channel in Channel::iter() {
                self.servos.write(channel, snapshot[channel.index()])?;
                self.pacer.pause(REPLAY_STEP_DELAY);
            }
        }
        writeln!(self.out, "Executed sequence of {count} positions.")?;
        self.pacer.pause(REPLAY_SETTLE);
        Ok(())
    }

    fn clear_sequence(&mut self) -> RigResult<()> {
        self.log.clear();
        writeln!(self.out, "Removed saved moves.")?;
        Ok(())
    }

    /// Read the target angle and sweep the channel to it one degree at a
    /// time.
    ///
    /// The sweep runs while the step offset's absolute value has not
    /// passed the absolute difference, so the boundary iteration re-writes
    /// the final angle; when the target equals the current angle the body
    /// still runs once and issues a single write at the unchanged angle.
    fn move_channel(&mut self, channel: Channel) -> RigResult<()> {
        let target = self.source.read_int()?;
        let current = self.angles[channel.index()];
        let diff = target - current;
        let direction: i32 = if diff > 0 { 1 } else { -1 };

        let mut offset: i32 = 0;
        while offset.abs() <= diff.abs() {
            self.servos.write(channel, current + offset)?;
            self.pacer.pause(STEP_DELAY);
            offset += direction;
        }

        self.angles[channel.index()] = target;
        self.report_state()
    }

    fn report_state(&mut self) -> RigResult<()> {
        writeln!(
            self.out,
            "Executed, current state: {} {} {} {}",
            self.angles[0], self.angles[1], self.angles[2], self.angles[3]
        )?;
        Ok(())
    }

    /// Current tracked angle of every channel, in channel index order.
    pub fn angles(&self) -> [i32; CHANNEL_COUNT] {
        self.angles
    }

    /// Number of recorded positions.
    pub fn saved_positions(&self) -> usize {
        self.log.len()
    }
}
