//! Error types for rig operation.

use thiserror::Error;

/// Errors that can occur while driving the rig.
///
/// Unrecognized command bytes are not errors: the interpreter reports them
/// on its status sink and keeps running. Everything here is a genuine
/// fault in the transport, the servo driver, or the sequence store.
#[derive(Error, Debug)]
pub enum RigError {
    /// Low-level I/O error (stream or sink read/write failure).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to open or poll the serial command link.
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// The servo driver rejected an attach or angle command.
    #[error("servo driver error: {0}")]
    Driver(String),

    /// The sequence log has no room for another snapshot.
    #[error("sequence log full ({capacity} positions)")]
    SequenceFull {
        /// Fixed capacity of the log.
        capacity: usize,
    },
}

/// Result type for rig operations.
pub type RigResult<T> = Result<T, RigError>;
