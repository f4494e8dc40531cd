//! Frame codec: serialization of `(class, id, payload)` triples and
//! validation of candidate frames.

use core::fmt;

use crate::{
    constants::{
        UBX_CHECKSUM_LEN, UBX_CLASS_OFFSET, UBX_HEADER_LEN, UBX_LENGTH_OFFSET, UBX_MIN_FRAME_LEN,
        UBX_MSG_ID_OFFSET, UBX_PAYLOAD_OFFSET, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2,
    },
    error::{DecodeError, DispatchError, EncodeError},
    parser::checksum::UbxChecksumCalc,
};

/// Receiver subsystems, as listed in the UBX class id table
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageClass {
    /// Navigation results
    Nav = 0x01,
    /// Receiver manager
    Rxm = 0x02,
    /// Information (ASCII text)
    Inf = 0x04,
    /// Ack/Nak replies to CFG messages
    Ack = 0x05,
    /// Configuration input
    Cfg = 0x06,
    /// Firmware update
    Upd = 0x09,
    /// Monitoring
    Mon = 0x0a,
    /// AssistNow aiding
    Aid = 0x0b,
    /// Timing
    Tim = 0x0d,
    /// External sensor fusion
    Esf = 0x10,
    /// Multiple GNSS assistance
    Mga = 0x13,
    /// Logging
    Log = 0x21,
    /// Security
    Sec = 0x27,
    /// High rate navigation results
    Hnr = 0x28,
}

impl MessageClass {
    pub const fn name(self) -> &'static str {
        match self {
            MessageClass::Nav => "NAV",
            MessageClass::Rxm => "RXM",
            MessageClass::Inf => "INF",
            MessageClass::Ack => "ACK",
            MessageClass::Cfg => "CFG",
            MessageClass::Upd => "UPD",
            MessageClass::Mon => "MON",
            MessageClass::Aid => "AID",
            MessageClass::Tim => "TIM",
            MessageClass::Esf => "ESF",
            MessageClass::Mga => "MGA",
            MessageClass::Log => "LOG",
            MessageClass::Sec => "SEC",
            MessageClass::Hnr => "HNR",
        }
    }
}

impl TryFrom<u8> for MessageClass {
    type Error = DispatchError;

    fn try_from(class: u8) -> Result<Self, Self::Error> {
        let class = match class {
            0x01 => MessageClass::Nav,
            0x02 => MessageClass::Rxm,
            0x04 => MessageClass::Inf,
            0x05 => MessageClass::Ack,
            0x06 => MessageClass::Cfg,
            0x09 => MessageClass::Upd,
            0x0a => MessageClass::Mon,
            0x0b => MessageClass::Aid,
            0x0d => MessageClass::Tim,
            0x10 => MessageClass::Esf,
            0x13 => MessageClass::Mga,
            0x21 => MessageClass::Log,
            0x27 => MessageClass::Sec,
            0x28 => MessageClass::Hnr,
            _ => return Err(DispatchError::UnknownClass { class }),
        };
        Ok(class)
    }
}

impl From<MessageClass> for u8 {
    fn from(class: MessageClass) -> u8 {
        class as u8
    }
}

impl fmt::Display for MessageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated UBX frame. The payload is owned, so the frame outlives the
/// buffer it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    class: u8,
    msg_id: u8,
    payload: Vec<u8>,
}

impl Frame {
    pub fn new(class: u8, msg_id: u8, payload: impl Into<Vec<u8>>) -> Result<Self, EncodeError> {
        let payload = payload.into();
        check_payload_len(payload.len())?;
        Ok(Self {
            class,
            msg_id,
            payload,
        })
    }

    /// Validate the frame at the head of `buf` and copy it out.
    ///
    /// Bytes past the frame's checksum are ignored; use [Frame::encoded_len]
    /// to find where the next frame would start.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < UBX_MIN_FRAME_LEN {
            return Err(DecodeError::LengthExceedsBuffer {
                expect: UBX_MIN_FRAME_LEN,
                got: buf.len(),
            });
        }
        if buf[0] != UBX_SYNC_CHAR_1 || buf[1] != UBX_SYNC_CHAR_2 {
            return Err(DecodeError::SyncMismatch);
        }

        let pack_len = usize::from(u16::from_le_bytes([
            buf[UBX_LENGTH_OFFSET],
            buf[UBX_LENGTH_OFFSET + 1],
        ]));
        let frame_len = UBX_MIN_FRAME_LEN + pack_len;
        if buf.len() < frame_len {
            return Err(DecodeError::LengthExceedsBuffer {
                expect: frame_len,
                got: buf.len(),
            });
        }

        let payload_end = UBX_PAYLOAD_OFFSET + pack_len;
        let mut calc = UbxChecksumCalc::new();
        calc.update(&buf[UBX_CLASS_OFFSET..payload_end]);
        calc.validate_result(buf[payload_end], buf[payload_end + 1])?;

        Ok(Self {
            class: buf[UBX_CLASS_OFFSET],
            msg_id: buf[UBX_MSG_ID_OFFSET],
            payload: buf[UBX_PAYLOAD_OFFSET..payload_end].to_vec(),
        })
    }

    pub fn class(&self) -> u8 {
        self.class
    }

    pub fn msg_id(&self) -> u8 {
        self.msg_id
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Class byte mapped onto the closed set of receiver classes
    pub fn message_class(&self) -> Result<MessageClass, DispatchError> {
        MessageClass::try_from(self.class)
    }

    /// Number of bytes this frame occupies on the wire
    pub fn encoded_len(&self) -> usize {
        UBX_MIN_FRAME_LEN + self.payload.len()
    }

    pub fn checksum(&self) -> (u8, u8) {
        let mut calc = UbxChecksumCalc::new();
        calc.update(&self.header_tail());
        calc.update(&self.payload);
        calc.result()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        // Length was checked on construction.
        write_frame(self.class, self.msg_id, &self.payload)
    }

    /// Class, id and little-endian length: the checksummed header bytes
    fn header_tail(&self) -> [u8; 4] {
        let [len_lo, len_hi] = (self.payload.len() as u16).to_le_bytes();
        [self.class, self.msg_id, len_lo, len_hi]
    }
}

fn check_payload_len(len: usize) -> Result<(), EncodeError> {
    if len > usize::from(u16::MAX) {
        return Err(EncodeError::PayloadTooLarge { len });
    }
    Ok(())
}

/// Serialize without the length check; callers guarantee `payload.len() <= u16::MAX`
fn write_frame(class: u8, msg_id: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(UBX_HEADER_LEN + payload.len() + UBX_CHECKSUM_LEN);
    out.push(UBX_SYNC_CHAR_1);
    out.push(UBX_SYNC_CHAR_2);
    out.push(class);
    out.push(msg_id);
    out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    out.extend_from_slice(payload);

    let mut calc = UbxChecksumCalc::new();
    calc.update(&out[UBX_CLASS_OFFSET..]);
    let (ck_a, ck_b) = calc.result();
    out.push(ck_a);
    out.push(ck_b);
    out
}

/// Build the wire bytes for `(class, msg_id, payload)`
pub fn encode(class: u8, msg_id: u8, payload: &[u8]) -> Result<Vec<u8>, EncodeError> {
    check_payload_len(payload.len())?;
    Ok(write_frame(class, msg_id, payload))
}

/// Shorthand for [Frame::decode]
pub fn decode(buf: &[u8]) -> Result<Frame, DecodeError> {
    Frame::decode(buf)
}

/// Request the receiver to output one `(class, msg_id)` message: the frame with an empty payload
pub fn poll_request(class: MessageClass, msg_id: u8) -> Vec<u8> {
    write_frame(class.into(), msg_id, &[])
}

/// Poll requests this crate knows how to act on, plus the ACK and INF
/// polls used when bringing up a receiver link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollRequest {
    /// UBX-ACK-ACK
    Ack,
    /// UBX-SEC-UNIQID
    SecUniqId,
    /// UBX-NAV-PVT
    NavPvt,
    /// UBX-INF-TEST
    InfTest,
}

impl PollRequest {
    pub const fn class_and_id(self) -> (MessageClass, u8) {
        match self {
            PollRequest::Ack => (MessageClass::Ack, 0x01),
            PollRequest::SecUniqId => (MessageClass::Sec, 0x03),
            PollRequest::NavPvt => (MessageClass::Nav, 0x07),
            PollRequest::InfTest => (MessageClass::Inf, 0x03),
        }
    }

    pub fn into_packet_bytes(self) -> Vec<u8> {
        let (class, msg_id) = self.class_and_id();
        poll_request(class, msg_id)
    }
}
