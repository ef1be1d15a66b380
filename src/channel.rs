//! Servo channel identifiers and their compiled-in wiring.

use std::fmt;

use strum::EnumIter;

/// Number of servo channels on the rig.
pub const CHANNEL_COUNT: usize = 4;

/// Output port each channel's servo is attached to, by channel index.
pub const OUTPUT_PORTS: [u8; CHANNEL_COUNT] = [2, 3, 4, 5];

/// Angle commanded at start-up, by channel index (degrees).
pub const DEFAULT_ANGLES: [i32; CHANNEL_COUNT] = [90, 90, 140, 0];

/// Servo channel identifiers.
///
/// The rig has four channels, addressed over the command link by the
/// ASCII letters `A` through `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Channel {
    /// Channel 0, command byte `A`
    A,
    /// Channel 1, command byte `B`
    B,
    /// Channel 2, command byte `C`
    C,
    /// Channel 3, command byte `D`
    D,
}

impl Channel {
    /// Get the zero-based channel index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a command byte to its channel.
    ///
    /// Defined only for `b'A'..=b'D'`; every other byte returns `None`.
    pub fn from_command_byte(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Channel::A),
            b'B' => Some(Channel::B),
            b'C' => Some(Channel::C),
            b'D' => Some(Channel::D),
            _ => None,
        }
    }

    /// ASCII letter addressing this channel.
    pub fn letter(self) -> char {
        match self {
            Channel::A => 'A',
            Channel::B => 'B',
            Channel::C => 'C',
            Channel::D => 'D',
        }
    }

    /// Output port this channel's servo is attached to.
    pub fn port(self) -> u8 {
        OUTPUT_PORTS[self.index()]
    }

    /// Angle commanded at start-up (degrees).
    pub fn default_angle(self) -> i32 {
        DEFAULT_ANGLES[self.index()]
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_command_byte_mapping() {
        assert_eq!(Channel::from_command_byte(b'A'), Some(Channel::A));
        assert_eq!(Channel::from_command_byte(b'B'), Some(Channel::B));
        assert_eq!(Channel::from_command_byte(b'C'), Some(Channel::C));
        assert_eq!(Channel::from_command_byte(b'D'), Some(Channel::D));
    }

    #[test]
    fn test_command_byte_mapping_rejects_other_bytes() {
        assert_eq!(Channel::from_command_byte(b'E'), None);
        assert_eq!(Channel::from_command_byte(b'a'), None);
        assert_eq!(Channel::from_command_byte(b'\n'), None);
        assert_eq!(Channel::from_command_byte(0), None);
    }

    #[test]
    fn test_iteration_order_matches_indices() {
        let channels: Vec<Channel> = Channel::iter().collect();
        assert_eq!(
            channels,
            vec![Channel::A, Channel::B, Channel::C, Channel::D]
        );
        for (i, channel) in Channel::iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn test_wiring_tables() {
        assert_eq!(Channel::A.port(), 2);
        assert_eq!(Channel::D.port(), 5);
        assert_eq!(Channel::A.default_angle(), 90);
        assert_eq!(Channel::C.default_angle(), 140);
        assert_eq!(Channel::D.default_angle(), 0);
    }

    #[test]
    fn test_display_uses_letter() {
        assert_eq!(Channel::C.to_string(), "C");
    }
}
