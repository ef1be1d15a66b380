//! Command input seam and the console-backed source.
//!
//! The rig consumes a byte-oriented stream: one byte selects the command,
//! and the angle-change commands read a following integer token. The
//! integer parser deliberately mirrors the lax contract of embedded serial
//! libraries — leading junk is skipped, a sign is honored only directly
//! before the digit run, the terminating byte is left in the stream, and a
//! token with no digits at all parses as zero.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::error::RigResult;

/// Whether a command source has data ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStatus {
    /// At least one byte can be read without blocking.
    Ready,
    /// No data yet; poll again later.
    Empty,
    /// The source will never produce another byte.
    Closed,
}

/// Byte-oriented command input stream.
pub trait CommandSource {
    /// Report whether a command byte is ready.
    fn available(&mut self) -> RigResult<InputStatus>;

    /// Consume one byte. Only call after [`available`](Self::available)
    /// returned [`InputStatus::Ready`].
    fn read_byte(&mut self) -> RigResult<u8>;

    /// Parse and consume the next integer token.
    ///
    /// Skips leading non-numeric bytes, honors a `-` immediately before
    /// the digit run, stops at the first trailing non-digit without
    /// consuming it, and returns `0` when no digits arrive.
    fn read_int(&mut self) -> RigResult<i32>;
}

/// Command source reading lines from a [`BufRead`] stream.
///
/// Intended for bench use: pipe commands into stdin instead of wiring up
/// a serial adapter. Bytes are consumed in order within each line,
/// including the trailing newline, so input behaves exactly like the
/// serial link.
pub struct ConsoleSource<R> {
    reader: R,
    pending: VecDeque<u8>,
    closed: bool,
}

impl<R: BufRead> ConsoleSource<R> {
    /// Wrap a buffered reader as a command source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            closed: false,
        }
    }

    /// Pull the next line into the pending buffer. Blocks until input
    /// arrives; a zero-byte read marks the source closed.
    fn refill(&mut self) -> RigResult<()> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            self.closed = true;
        } else {
            self.pending.extend(line.bytes());
        }
        Ok(())
    }

    /// Look at the next byte without consuming it, refilling as needed.
    fn peek(&mut self) -> RigResult<Option<u8>> {
        while self.pending.is_empty() && !self.closed {
            self.refill()?;
        }
        Ok(self.pending.front().copied())
    }
}

impl<R: BufRead> CommandSource for ConsoleSource<R> {
    fn available(&mut self) -> RigResult<InputStatus> {
        match self.peek()? {
            Some(_) => Ok(InputStatus::Ready),
            None => Ok(InputStatus::Closed),
        }
    }

    fn read_byte(&mut self) -> RigResult<u8> {
        match self.peek()? {
            Some(byte) => {
                self.pending.pop_front();
                Ok(byte)
            }
            None => Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into()),
        }
    }

    fn read_int(&mut self) -> RigResult<i32> {
        // Skip until the start of a digit run. A '-' only keeps its sign
        // when the very next byte is a digit.
        let mut negative = false;
        loop {
            match self.peek()? {
                None => return Ok(0),
                Some(b'-') => {
                    negative = true;
                    self.pending.pop_front();
                }
                Some(b'0'..=b'9') => break,
                Some(_) => {
                    negative = false;
                    self.pending.pop_front();
                }
            }
        }

        // Accumulate digits; the terminating byte stays in the stream.
        let mut value: i32 = 0;
        while let Some(byte @ b'0'..=b'9') = self.peek()? {
            value = value.wrapping_mul(10).wrapping_add((byte - b'0') as i32);
            self.pending.pop_front();
        }

        Ok(if negative { -value } else { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(input: &str) -> ConsoleSource<Cursor<Vec<u8>>> {
        ConsoleSource::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn test_read_int_plain() {
        let mut src = source("120\n");
        assert_eq!(src.read_int().unwrap(), 120);
        // Terminator is left in the stream.
        assert_eq!(src.read_byte().unwrap(), b'\n');
    }

    #[test]
    fn test_read_int_skips_leading_junk() {
        let mut src = source(" foo 42x\n");
        assert_eq!(src.read_int().unwrap(), 42);
        assert_eq!(src.read_byte().unwrap(), b'x');
    }

    #[test]
    fn test_read_int_negative() {
        let mut src = source("-15\n");
        assert_eq!(src.read_int().unwrap(), -15);
    }

    #[test]
    fn test_read_int_sign_must_touch_digits() {
        // The '-' is detached from the digit run, so it is dropped.
        let mut src = source("-x5\n");
        assert_eq!(src.read_int().unwrap(), 5);
    }

    #[test]
    fn test_read_int_no_digits_parses_as_zero() {
        let mut src = source("abc\n");
        assert_eq!(src.read_int().unwrap(), 0);
    }

    #[test]
    fn test_read_int_stops_at_end_of_input() {
        let mut src = source("7");
        assert_eq!(src.read_int().unwrap(), 7);
        assert_eq!(src.available().unwrap(), InputStatus::Closed);
    }

    #[test]
    fn test_available_lifecycle() {
        let mut src = source("S\n");
        assert_eq!(src.available().unwrap(), InputStatus::Ready);
        assert_eq!(src.read_byte().unwrap(), b'S');
        assert_eq!(src.read_byte().unwrap(), b'\n');
        assert_eq!(src.available().unwrap(), InputStatus::Closed);
    }

    #[test]
    fn test_bytes_span_lines() {
        let mut src = source("S\nP\n");
        assert_eq!(src.read_byte().unwrap(), b'S');
        assert_eq!(src.read_byte().unwrap(), b'\n');
        assert_eq!(src.read_byte().unwrap(), b'P');
        assert_eq!(src.read_byte().unwrap(), b'\n');
        assert_eq!(src.available().unwrap(), InputStatus::Closed);
    }
}
