//! Serial-commanded four-servo rig controller.
//!
//! Reads single-character commands from a byte-oriented link, sweeps up
//! to four servos to commanded angles with fixed-step pacing, and records
//! and replays sequences of saved positions.
//!
//! The control loop is deliberately simple: single-threaded, polling,
//! with blocking delays pacing all motion. See [`interpreter`] for the
//! command set and [`channel`] for the compiled-in wiring.
//!
//! # Example
//!
//! Run the interpreter against stdin with a dry-run servo bank:
//!
//! ```no_run
//! use std::io::BufReader;
//! use servo_rig::{ConsoleSource, Interpreter, SystemPacer, TraceServoBank};
//!
//! let source = ConsoleSource::new(BufReader::new(std::io::stdin()));
//! let mut rig = Interpreter::new(source, TraceServoBank, SystemPacer, std::io::stdout());
//! rig.start()?;
//! rig.run()?;
//! # Ok::<(), servo_rig::RigError>(())
//! ```
//!
//! On hardware, swap in [`SerialSource`] for the command link and (with
//! the `rpi` feature) `rpi::GpioServoBank` for actuation.

pub mod channel;
pub mod error;
pub mod interpreter;
pub mod pace;
pub mod sequence;
pub mod serial;
pub mod servo;
pub mod source;

#[cfg(feature = "rpi")]
pub mod rpi;

pub use channel::{Channel, CHANNEL_COUNT, DEFAULT_ANGLES, OUTPUT_PORTS};
pub use error::{RigError, RigResult};
pub use interpreter::Interpreter;
pub use pace::{Pacer, SystemPacer};
pub use sequence::{SequenceLog, Snapshot, SEQUENCE_CAPACITY};
pub use serial::SerialSource;
pub use servo::{ServoBank, TraceServoBank};
pub use source::{CommandSource, ConsoleSource, InputStatus};
