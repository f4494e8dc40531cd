#[macro_use]
extern crate afl;
extern crate ubx_nav;

use ubx_nav::{dispatch, NavStore, Parser, ParserConfig};

fn parse(max_payload_len: u16, chunksize: usize, data: &[u8]) {
    let store = NavStore::new();
    let mut parser = Parser::new(ParserConfig::default().with_max_payload_len(max_payload_len));
    for chunk in data.chunks(chunksize) {
        for res in parser.consume(chunk) {
            if let Ok(frame) = res {
                // Unknown classes and short payloads are reported, never fatal
                let _ = dispatch(&frame, &store);
            }
        }
    }
    let stats = parser.stats();
    assert!(stats.dropped_bytes + (parser.buffer_len() as u64) <= data.len() as u64);

    // Whatever the fuzz input left behind, a reset parser must find a clean frame
    parser.reset();
    let ack_ack = [0xb5, 0x62, 0x5, 0x1, 0x2, 0x0, 0x4, 0x5, 0x11, 0x38];
    let mut it = parser.consume(&ack_ack);
    match it.next() {
        Some(Ok(frame)) => assert_eq!((frame.class(), frame.msg_id()), (0x05, 0x01)),
        other => panic!("expected ACK-ACK, got {:?}", other),
    }
    assert!(it.next().is_none());
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() > 2 {
            let max_payload_len = 8 + u16::from(data[0]) * 8;
            let chunksize = data[1] as usize;
            if chunksize != 0 {
                parse(max_payload_len, chunksize, &data[2..]);
            }
        }
    });
}
