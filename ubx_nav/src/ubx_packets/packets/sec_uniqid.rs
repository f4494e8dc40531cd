use core::fmt;

use crate::frame::MessageClass;

ubx_packet_layout! {
    class = MessageClass::Sec, id = 0x03, payload_len = 9, name = "SEC-UNIQID";

    /// Unique chip ID
    pub struct SecUniqId {
        /// Message version
        version @ 0: u8,
        unique_id @ 4: [u8; 5],
    }
}

/// Five byte chip identity of the receiver
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReceiverId(pub [u8; 5]);

impl ReceiverId {
    pub const fn as_bytes(&self) -> &[u8; 5] {
        &self.0
    }
}

impl From<&SecUniqId> for ReceiverId {
    fn from(packet: &SecUniqId) -> Self {
        ReceiverId(packet.unique_id)
    }
}

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}
