//! Serial-link command source over the `serialport` crate.

use std::io::Read;
use std::time::{Duration, Instant};

use serialport::SerialPort;
use tracing::debug;

use crate::error::RigResult;
use crate::source::{CommandSource, InputStatus};

/// Default baud rate of the command link.
pub const BAUD_RATE: u32 = 115_200;

/// How long the integer parser waits for digits before giving up.
const PARSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Per-read timeout on the underlying port.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Command source backed by a serial device.
///
/// `available` maps to the port's receive-buffer count, so the poll loop
/// never blocks on an idle link. The integer parser reads ahead one byte
/// to find the end of a digit run; that byte is held back and returned by
/// the next `read_byte`.
pub struct SerialSource {
    port: Box<dyn SerialPort>,
    peeked: Option<u8>,
}

impl SerialSource {
    /// Open the serial device at the given path.
    pub fn open(path: &str, baud: u32) -> RigResult<Self> {
        let port = serialport::new(path, baud).timeout(READ_TIMEOUT).open()?;
        debug!("opened {} at {} baud", path, baud);
        Ok(Self { port, peeked: None })
    }

    /// Read one byte, returning `None` if the port timed out first.
    fn try_read_byte(&mut self) -> RigResult<Option<u8>> {
        if let Some(byte) = self.peeked.take() {
            return Ok(Some(byte));
        }

        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl CommandSource for SerialSource {
    fn available(&mut self) -> RigResult<InputStatus> {
        if self.peeked.is_some() || self.port.bytes_to_read()? > 0 {
            Ok(InputStatus::Ready)
        } else {
            Ok(InputStatus::Empty)
        }
    }

    fn read_byte(&mut self) -> RigResult<u8> {
        loop {
            if let Some(byte) = self.try_read_byte()? {
                return Ok(byte);
            }
        }
    }

    fn read_int(&mut self) -> RigResult<i32> {
        let deadline = Instant::now() + PARSE_TIMEOUT;

        // Skip until the start of a digit run. A '-' only keeps its sign
        // when the very next byte is a digit.
        let mut negative = false;
        loop {
            let Some(byte) = self.try_read_byte()? else {
                if Instant::now() >= deadline {
                    return Ok(0);
                }
                continue;
            };
            match byte {
                b'-' => negative = true,
                b'0'..=b'9' => {
                    self.peeked = Some(byte);
                    break;
                }
                _ => negative = false,
            }
        }

        // Accumulate digits; the terminating byte is held back for the
        // next read. A receive gap ends the token.
        let mut value: i32 = 0;
        loop {
            match self.try_read_byte()? {
                Some(byte @ b'0'..=b'9') => {
                    value = value.wrapping_mul(10).wrapping_add((byte - b'0') as i32);
                }
                Some(other) => {
                    self.peeked = Some(other);
                    break;
                }
                None => break,
            }
        }

        Ok(if negative { -value } else { value })
    }
}
