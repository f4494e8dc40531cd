use core::fmt;

use crate::frame::MessageClass;

/// Error returned when a frame cannot be serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The payload does not fit in the two byte length field
    PayloadTooLarge { len: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::PayloadTooLarge { len } => write!(
                f,
                "Payload of {} bytes does not fit the length field (max {})",
                len,
                u16::MAX
            ),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Error raised while validating a single candidate frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer does not start with `0xB5 0x62`
    SyncMismatch,
    /// The buffer is shorter than the frame it claims to hold
    LengthExceedsBuffer { expect: usize, got: usize },
    /// Checksum values are the little-endian `u16` of `(ck_a, ck_b)`
    ChecksumMismatch { expect: u16, got: u16 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::SyncMismatch => f.write_str("Frame does not start with UBX sync chars"),
            DecodeError::LengthExceedsBuffer { expect, got } => write!(
                f,
                "Frame needs {} bytes but buffer holds only {}",
                expect, got
            ),
            DecodeError::ChecksumMismatch { expect, got } => write!(
                f,
                "Not valid frame's checksum, expect {:x}, got {:x}",
                expect, got
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Error reported by the stream [Parser](crate::Parser). Every variant is
/// recoverable, the parser is already scanning for the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    /// The length field declared a payload above the configured maximum
    FrameTooLarge { len: usize, max: usize },
    /// A fully framed run failed validation
    Decode(DecodeError),
}

impl From<DecodeError> for ParserError {
    fn from(err: DecodeError) -> Self {
        ParserError::Decode(err)
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::FrameTooLarge { len, max } => write!(
                f,
                "Declared payload length {} exceeds maximum {}",
                len, max
            ),
            ParserError::Decode(e) => write!(f, "Invalid frame: {}", e),
        }
    }
}

impl std::error::Error for ParserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParserError::Decode(e) => Some(e),
            ParserError::FrameTooLarge { .. } => None,
        }
    }
}

/// Outcome of a frame that passed validation but could not be projected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// The class byte is not one of the receiver's message classes
    UnknownClass { class: u8 },
    /// Known class, but no projector exists for this `(class, id)`
    UnimplementedClass { class: MessageClass, id: u8 },
    /// Payload is shorter than the documented layout
    InvalidPayloadLen {
        packet: &'static str,
        expect: usize,
        got: usize,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownClass { class } => {
                write!(f, "Unknown message class 0x{:02x}", class)
            },
            DispatchError::UnimplementedClass { class, id } => {
                write!(f, "No projector for {}-0x{:02x}", class, id)
            },
            DispatchError::InvalidPayloadLen {
                packet,
                expect,
                got,
            } => write!(
                f,
                "Invalid packet({}) length, expect {}, got {}",
                packet, expect, got
            ),
        }
    }
}

impl std::error::Error for DispatchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
    InvalidNanoseconds,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
            DateTimeError::InvalidNanoseconds => f.write_str("invalid nanoseconds"),
        }
    }
}

impl std::error::Error for DateTimeError {}
