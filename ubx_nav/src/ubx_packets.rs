use num_traits::ToPrimitive;

use crate::frame::MessageClass;

/// Information about a concrete UBX payload layout
pub trait UbxPacketMeta {
    const CLASS: MessageClass;
    const ID: u8;
    /// Minimum payload length covering every projected field
    const PAYLOAD_LEN: usize;
    const NAME: &'static str;
}

/// One row of a payload layout table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

/// Fixed-width little-endian read. Callers check bounds first.
pub(crate) trait LeField: Sized {
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_le_field {
    ($($t:ty),*) => {
        $(
            impl LeField for $t {
                fn read_le(bytes: &[u8]) -> Self {
                    const WIDTH: usize = core::mem::size_of::<$t>();
                    let mut raw = [0u8; WIDTH];
                    raw.copy_from_slice(&bytes[..WIDTH]);
                    <$t>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_le_field!(u8, i8, u16, i16, u32, i32);

impl<const N: usize> LeField for [u8; N] {
    fn read_le(bytes: &[u8]) -> Self {
        let mut raw = [0u8; N];
        raw.copy_from_slice(&bytes[..N]);
        raw
    }
}

pub(crate) fn scaled<T: ToPrimitive>(raw: T, scale: f64) -> f64 {
    raw.to_f64().map_or(f64::NAN, |v| v * scale)
}

/// Declares a payload record together with its `(field, offset, width)`
/// table and a projector reading every field from a validated payload.
macro_rules! ubx_packet_layout {
    (
        class = $class:path, id = $id:literal, payload_len = $len:literal, name = $pname:literal;
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident @ $offset:literal : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl $crate::ubx_packets::UbxPacketMeta for $name {
            const CLASS: $crate::frame::MessageClass = $class;
            const ID: u8 = $id;
            const PAYLOAD_LEN: usize = $len;
            const NAME: &'static str = $pname;
        }

        impl $name {
            /// Byte offset and width of every field inside the payload
            pub const FIELDS: &'static [$crate::ubx_packets::FieldLayout] = &[
                $(
                    $crate::ubx_packets::FieldLayout {
                        name: stringify!($field),
                        offset: $offset,
                        width: core::mem::size_of::<$ty>(),
                    },
                )*
            ];

            /// Project a payload onto the record. Trailing bytes past the
            /// documented layout are ignored.
            pub fn from_payload(payload: &[u8]) -> Result<Self, $crate::error::DispatchError> {
                if payload.len() < $len {
                    return Err($crate::error::DispatchError::InvalidPayloadLen {
                        packet: $pname,
                        expect: $len,
                        got: payload.len(),
                    });
                }
                Ok(Self {
                    $(
                        $field: <$ty as $crate::ubx_packets::LeField>::read_le(&payload[$offset..]),
                    )*
                })
            }
        }
    };
}

/// Unit-converting getters over raw integer fields
macro_rules! ubx_scaled_getters {
    (
        $name:ident {
            $(
                $(#[$meta:meta])*
                $getter:ident => $field:ident * $scale:literal
            ),* $(,)?
        }
    ) => {
        impl $name {
            $(
                $(#[$meta])*
                pub fn $getter(&self) -> f64 {
                    $crate::ubx_packets::scaled(self.$field, $scale)
                }
            )*
        }
    };
}

mod packets;
mod types;

pub use packets::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn check_table<T: UbxPacketMeta>(fields: &[FieldLayout]) {
        for pair in fields.windows(2) {
            assert!(
                pair[0].offset + pair[0].width <= pair[1].offset,
                "{}: {} overlaps {}",
                T::NAME,
                pair[0].name,
                pair[1].name
            );
        }
        let last = fields.last().unwrap();
        assert!(last.offset + last.width <= T::PAYLOAD_LEN);
    }

    #[test]
    fn layouts_fit_their_payload() {
        check_table::<NavSolution>(NavSolution::FIELDS);
        check_table::<SecUniqId>(SecUniqId::FIELDS);
    }

    #[test]
    fn le_reads() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05];
        assert_eq!(u16::read_le(&bytes), 0x0201);
        assert_eq!(u32::read_le(&bytes[1..]), 0x0504_0302);
        assert_eq!(i16::read_le(&[0xff, 0xff]), -1);
        assert_eq!(<[u8; 3]>::read_le(&bytes[2..]), [3, 4, 5]);
    }

    #[test]
    fn le_reads_every_width() {
        let bytes = [0xfe, 0xff, 0xff, 0xff, 0x7f];
        assert_eq!(u8::read_le(&bytes), 0xfe);
        assert_eq!(i8::read_le(&bytes), -2);
        assert_eq!(u16::read_le(&bytes[3..]), 0x7fff);
        assert_eq!(i32::read_le(&bytes), -2);
        assert_eq!(u32::read_le(&bytes[1..]), 0x7fff_ffff);
        // Only the leading bytes of a longer slice are read
        assert_eq!(u16::read_le(&bytes[1..]), 0xffff);
    }
}
