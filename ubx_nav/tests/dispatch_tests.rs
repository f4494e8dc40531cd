use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use ubx_nav::{
    decode, dispatch, encode, DecodeError, DispatchError, Dispatched, GnssFixType, MessageClass,
    NavStore, Parser, Position, ReceiverId,
};

fn nav_pvt_payload() -> Vec<u8> {
    let mut p = vec![0u8; 92];
    p[0..4].copy_from_slice(&418_000_000u32.to_le_bytes());
    p[4..6].copy_from_slice(&2026u16.to_le_bytes());
    p[6] = 1; // month
    p[7] = 21; // day
    p[8] = 10;
    p[9] = 4;
    p[10] = 30;
    p[11] = 0x07;
    p[20] = 3;
    p[21] = 0x01;
    p[23] = 11; // numSV
    p[24..28].copy_from_slice(&(-977_000_000i32).to_le_bytes());
    p[28..32].copy_from_slice(&302_000_000i32.to_le_bytes());
    p[36..40].copy_from_slice(&150_000i32.to_le_bytes());
    p
}

fn sec_uniqid_payload() -> Vec<u8> {
    vec![0x01, 0x00, 0x00, 0x00, 0x0a, 0x1b, 0x2c, 0x3d, 0x4e]
}

#[test]
fn test_nav_pvt_end_to_end() {
    let bytes = encode(0x01, 0x07, &nav_pvt_payload()).unwrap();
    let store = NavStore::new();
    let mut parser = Parser::default();
    for res in parser.consume(&bytes) {
        assert_eq!(dispatch(&res.unwrap(), &store), Ok(Dispatched::Navigation));
    }

    let nav = store.navigation();
    assert_eq!(nav.year, 2026);
    assert_eq!(nav.month, 1);
    assert_eq!(nav.day, 21);
    assert_eq!(nav.num_satellites, 11);
    assert_eq!(nav.lon, -977_000_000);
    assert_eq!(nav.gnss_fix_type(), GnssFixType::Fix3D);
    assert!(nav.has_position());

    let pos = Position::from(&nav);
    assert!((pos.lat - 30.2).abs() < 1e-9);
    assert!((pos.alt - 150.0).abs() < 1e-9);
    let time = DateTime::<Utc>::try_from(&nav).unwrap();
    assert_eq!(time, Utc.with_ymd_and_hms(2026, 1, 21, 10, 4, 30).unwrap());

    assert_eq!(store.identity(), ReceiverId::default());
}

#[test]
fn test_dispatch_is_idempotent() {
    let store = NavStore::new();
    let nav = decode(&encode(0x01, 0x07, &nav_pvt_payload()).unwrap()).unwrap();
    let id = decode(&encode(0x27, 0x03, &sec_uniqid_payload()).unwrap()).unwrap();

    dispatch(&nav, &store).unwrap();
    dispatch(&id, &store).unwrap();
    let first = store.snapshot();
    dispatch(&nav, &store).unwrap();
    dispatch(&id, &store).unwrap();
    assert_eq!(store.snapshot(), first);
    assert_eq!(first.identity.to_string(), "0a1b2c3d4e");
}

#[test]
fn test_unimplemented_class_leaves_store_alone() {
    let store = NavStore::new();
    let nav = decode(&encode(0x01, 0x07, &nav_pvt_payload()).unwrap()).unwrap();
    dispatch(&nav, &store).unwrap();
    let before = store.snapshot();

    let mon_ver = decode(&encode(0x0a, 0x04, &[0u8; 40]).unwrap()).unwrap();
    assert_eq!(
        dispatch(&mon_ver, &store),
        Err(DispatchError::UnimplementedClass {
            class: MessageClass::Mon,
            id: 0x04
        })
    );
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_longer_payload_projects_documented_prefix() {
    let mut payload = sec_uniqid_payload();
    payload.extend_from_slice(&[0xff; 4]);
    let frame = decode(&encode(0x27, 0x03, &payload).unwrap()).unwrap();
    let store = NavStore::new();
    assert_eq!(dispatch(&frame, &store), Ok(Dispatched::Identity));
    assert_eq!(store.identity().as_bytes(), &[0x0a, 0x1b, 0x2c, 0x3d, 0x4e]);
}

proptest! {
    #[test]
    fn test_encode_decode_preserves_triple(
        class in any::<u8>(),
        msg_id in any::<u8>(),
        payload in proptest::collection::vec(any::<u8>(), 0..300),
    ) {
        let bytes = encode(class, msg_id, &payload).unwrap();
        prop_assert_eq!(bytes.len(), payload.len() + 8);
        let frame = decode(&bytes).unwrap();
        prop_assert_eq!(frame.class(), class);
        prop_assert_eq!(frame.msg_id(), msg_id);
        prop_assert_eq!(frame.payload(), &payload[..]);
    }

    #[test]
    fn test_single_bit_flip_is_detected(
        payload in proptest::collection::vec(any::<u8>(), 1..120),
        pos in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut bytes = encode(0x01, 0x07, &payload).unwrap();
        // class, id and payload; the length bytes would change the framing instead
        let mut covered = vec![2, 3];
        covered.extend(6..6 + payload.len());
        let i = covered[pos.index(covered.len())];
        bytes[i] ^= 1 << bit;
        let mismatch = matches!(decode(&bytes), Err(DecodeError::ChecksumMismatch { .. }));
        prop_assert!(mismatch, "flipped bit {} of byte {} was not detected", bit, i);
    }
}
