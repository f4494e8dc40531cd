use log::{debug, trace, warn};

use crate::{
    constants::{
        UBX_CHECKSUM_LEN, UBX_HEADER_LEN, UBX_LENGTH_OFFSET, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2,
        MAX_PAYLOAD_LEN,
    },
    error::{DecodeError, ParserError},
    frame::Frame,
};

pub mod checksum;

/// Tunables for the stream [Parser]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    max_payload_len: usize,
}

impl ParserConfig {
    pub const fn new() -> Self {
        Self {
            max_payload_len: MAX_PAYLOAD_LEN as usize,
        }
    }

    /// Frames declaring a longer payload are dropped with [ParserError::FrameTooLarge]
    pub const fn with_max_payload_len(mut self, max_payload_len: u16) -> Self {
        self.max_payload_len = max_payload_len as usize;
        self
    }

    pub const fn max_payload_len(&self) -> usize {
        self.max_payload_len
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the parser is inside the frame grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    SeekingSync1,
    SeekingSync2,
    /// class, id and the two length bytes
    ReadingHeader,
    ReadingPayload,
    ReadingChecksum,
}

/// Running counters, for observability only
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserStats {
    /// Bytes discarded while hunting for sync, or belonging to rejected frames
    pub dropped_bytes: u64,
    /// Frames that passed validation
    pub frames: u64,
    pub checksum_errors: u64,
    pub oversize_frames: u64,
}

/// Streaming parser for the UBX protocol.
///
/// Bytes may arrive in chunks of any size, split anywhere. The parser keeps
/// at most one candidate frame buffered, bounded by the configured maximum
/// payload length, and never fails fatally: on any error it drops the
/// candidate and resumes looking for `0xB5 0x62`.
///
/// ```
/// use ubx_nav::{Parser, PollRequest};
///
/// let mut parser = Parser::default();
/// let bytes = PollRequest::NavPvt.into_packet_bytes();
/// let mut it = parser.consume(&bytes);
/// let frame = it.next().unwrap().unwrap();
/// assert_eq!((frame.class(), frame.msg_id()), (0x01, 0x07));
/// assert!(it.next().is_none());
/// ```
#[derive(Debug)]
pub struct Parser {
    config: ParserConfig,
    state: ParserState,
    buf: Vec<u8>,
    pack_len: usize,
    stats: ParserStats,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            state: ParserState::SeekingSync1,
            buf: Vec::with_capacity(UBX_HEADER_LEN + UBX_CHECKSUM_LEN),
            pack_len: 0,
            stats: ParserStats::default(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Bytes of the current, not yet complete, candidate frame
    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drop any partial frame and start over
    pub fn reset(&mut self) {
        self.stats.dropped_bytes += self.buf.len() as u64;
        self.restart();
    }

    /// Add data to the parser and get an iterator over the frames completed by it.
    ///
    /// The iterator borrows the parser; dropping it before exhausting it
    /// leaves the remaining bytes of `new_data` unprocessed.
    pub fn consume<'a>(&'a mut self, new_data: &'a [u8]) -> ParserIter<'a> {
        ParserIter {
            parser: self,
            data: new_data,
        }
    }

    /// Advance the state machine by one byte. Returns `Some` once a framed run
    /// has been checked, or when a header is rejected.
    pub fn feed(&mut self, byte: u8) -> Option<Result<Frame, ParserError>> {
        match self.state {
            ParserState::SeekingSync1 => {
                if byte == UBX_SYNC_CHAR_1 {
                    self.buf.push(byte);
                    self.state = ParserState::SeekingSync2;
                } else {
                    self.stats.dropped_bytes += 1;
                }
                None
            },
            ParserState::SeekingSync2 => {
                if byte == UBX_SYNC_CHAR_2 {
                    self.buf.push(byte);
                    self.state = ParserState::ReadingHeader;
                } else if byte == UBX_SYNC_CHAR_1 {
                    // The previous 0xB5 was noise, this one may start a frame
                    self.stats.dropped_bytes += 1;
                } else {
                    debug!("Lost sync on byte 0x{:02x}", byte);
                    self.stats.dropped_bytes += 2;
                    self.restart();
                }
                None
            },
            ParserState::ReadingHeader => {
                self.buf.push(byte);
                if self.buf.len() < UBX_HEADER_LEN {
                    return None;
                }
                let pack_len = usize::from(u16::from_le_bytes([
                    self.buf[UBX_LENGTH_OFFSET],
                    self.buf[UBX_LENGTH_OFFSET + 1],
                ]));
                if pack_len > self.config.max_payload_len {
                    warn!(
                        "Dropping frame 0x{:02x}-0x{:02x}: payload length {} above maximum {}",
                        self.buf[2], self.buf[3], pack_len, self.config.max_payload_len
                    );
                    self.stats.oversize_frames += 1;
                    self.reset();
                    return Some(Err(ParserError::FrameTooLarge {
                        len: pack_len,
                        max: self.config.max_payload_len,
                    }));
                }
                self.pack_len = pack_len;
                self.buf.reserve_exact(pack_len + UBX_CHECKSUM_LEN);
                self.state = if pack_len == 0 {
                    ParserState::ReadingChecksum
                } else {
                    ParserState::ReadingPayload
                };
                None
            },
            ParserState::ReadingPayload => {
                self.buf.push(byte);
                if self.buf.len() == UBX_HEADER_LEN + self.pack_len {
                    self.state = ParserState::ReadingChecksum;
                }
                None
            },
            ParserState::ReadingChecksum => {
                self.buf.push(byte);
                if self.buf.len() < UBX_HEADER_LEN + self.pack_len + UBX_CHECKSUM_LEN {
                    return None;
                }
                Some(self.finish_frame())
            },
        }
    }

    /// Hand the framed run to the codec. One attempt only, whatever the outcome.
    fn finish_frame(&mut self) -> Result<Frame, ParserError> {
        let result = Frame::decode(&self.buf);
        match &result {
            Ok(frame) => {
                trace!(
                    "Frame 0x{:02x}-0x{:02x}, {} payload bytes",
                    frame.class(),
                    frame.msg_id(),
                    frame.payload().len()
                );
                self.stats.frames += 1;
                self.restart();
            },
            Err(e) => {
                warn!("Dropping frame: {}", e);
                if let DecodeError::ChecksumMismatch { .. } = e {
                    self.stats.checksum_errors += 1;
                }
                self.reset();
            },
        }
        result.map_err(ParserError::from)
    }

    fn restart(&mut self) {
        self.buf.clear();
        self.pack_len = 0;
        self.state = ParserState::SeekingSync1;
    }
}

/// Iterator over the frames completed by one chunk of input
pub struct ParserIter<'a> {
    parser: &'a mut Parser,
    data: &'a [u8],
}

impl Iterator for ParserIter<'_> {
    type Item = Result<Frame, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((&byte, rest)) = self.data.split_first() {
            self.data = rest;
            if let Some(result) = self.parser.feed(byte) {
                return Some(result);
            }
        }
        None
    }
}
