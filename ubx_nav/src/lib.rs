//! # ubx_nav
//!
//! Decoder for the u-blox UBX binary protocol that keeps the latest
//! navigation solution and receiver identity in a shared store.
//!
//! Constructing Frames
//! ===================
//!
//! Any `(class, id, payload)` triple can be serialized with [encode]. Poll
//! requests, the empty-payload frames that ask a receiver to output one
//! message, are available through [PollRequest]:
//! ```
//! use ubx_nav::{encode, PollRequest};
//!
//! assert_eq!(
//!     PollRequest::SecUniqId.into_packet_bytes(),
//!     [0xb5, 0x62, 0x27, 0x03, 0x00, 0x00, 0x2a, 0xa5]
//! );
//! let ack = encode(0x05, 0x01, &[0x06, 0x01]).unwrap();
//! assert_eq!(ack.len(), 10);
//! ```
//!
//! Parsing Frames
//! ==============
//!
//! Bytes read from the serial link go into a [Parser] using its `consume()`
//! method, which returns an iterator over every frame the new bytes
//! completed. Malformed input is reported and skipped; the parser always
//! resynchronizes on the next `0xB5 0x62`. Validated frames are then handed
//! to [dispatch], which updates a [NavStore]:
//! ```
//! use ubx_nav::{dispatch, NavStore, Parser};
//!
//! let store = NavStore::new();
//! let mut parser = Parser::default();
//! let my_raw_data = vec![1, 2, 3, 4]; // From your serial port
//! for result in parser.consume(&my_raw_data) {
//!     match result {
//!         Ok(frame) => {
//!             let _ = dispatch(&frame, &store);
//!         },
//!         Err(_) => {
//!             // Malformed frame, already dropped
//!         },
//!     }
//! }
//! assert_eq!(store.snapshot().navigation.year, 0);
//! ```

#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    dispatch::{dispatch, projector_for, Dispatched, Projector},
    error::{DateTimeError, DecodeError, DispatchError, EncodeError, ParserError},
    frame::{decode, encode, poll_request, Frame, MessageClass, PollRequest},
    parser::{
        checksum::{ubx_checksum, UbxChecksumCalc},
        Parser, ParserConfig, ParserIter, ParserState, ParserStats,
    },
    store::{NavSnapshot, NavStore},
    ubx_packets::*,
};

pub mod constants;
mod dispatch;
mod error;
mod frame;
mod parser;
mod store;
mod ubx_packets;
