//! Varint Tests
//!
//! Tests for variable-length integer encoding and decoding.

use bytes::BytesMut;
use rconping::protocol::{decode_varint, encode_varint, write_varint, VarintDecode};
use rconping::protocol::varint::varint_len;

fn decode_complete(bytes: &[u8]) -> (i32, usize) {
    match decode_varint(bytes) {
        VarintDecode::Complete { value, len } => (value, len),
        other => panic!("Expected complete varint, got {:?}", other),
    }
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_small_values() {
    assert_eq!(encode_varint(0), vec![0x00]);
    assert_eq!(encode_varint(1), vec![0x01]);
    assert_eq!(encode_varint(127), vec![0x7F]);
    assert_eq!(encode_varint(128), vec![0x80, 0x01]);
    assert_eq!(encode_varint(255), vec![0xFF, 0x01]);
    assert_eq!(encode_varint(25565), vec![0xDD, 0xC7, 0x01]);
}

#[test]
fn test_encode_minus_one_takes_five_bytes() {
    // -1 wraps to 0xFFFF_FFFF: four full groups, then the top 4 bits
    assert_eq!(encode_varint(-1), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
}

#[test]
fn test_encode_extremes() {
    assert_eq!(encode_varint(i32::MAX), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x07]);
    assert_eq!(encode_varint(i32::MIN), vec![0x80, 0x80, 0x80, 0x80, 0x08]);
}

#[test]
fn test_write_varint_appends() {
    let mut buf = BytesMut::new();
    buf.extend_from_slice(&[0xAA]);
    write_varint(&mut buf, 300);
    assert_eq!(&buf[..], &[0xAA, 0xAC, 0x02]);
}

#[test]
fn test_varint_len_matches_encoding() {
    for value in [0, 1, 127, 128, 16_383, 16_384, 2_097_151, 2_097_152, i32::MAX, -1, i32::MIN] {
        assert_eq!(varint_len(value), encode_varint(value).len(), "value {}", value);
    }
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_round_trip_boundaries() {
    for value in [0, -1, 1, 127, 128, 300, 25565, i32::MAX, i32::MIN, -300] {
        let encoded = encode_varint(value);
        let (decoded, len) = decode_complete(&encoded);
        assert_eq!(decoded, value);
        assert_eq!(len, encoded.len());
        assert_eq!(encode_varint(decoded), encoded);
    }
}

#[test]
fn test_decode_sign_extends_top_bit() {
    let (value, _) = decode_complete(&[0x80, 0x80, 0x80, 0x80, 0x08]);
    assert_eq!(value, i32::MIN);
}

#[test]
fn test_decode_ignores_trailing_bytes() {
    let (value, len) = decode_complete(&[0xAC, 0x02, 0xFF, 0xFF]);
    assert_eq!(value, 300);
    assert_eq!(len, 2);
}

#[test]
fn test_decode_empty_is_incomplete() {
    assert_eq!(decode_varint(&[]), VarintDecode::Incomplete);
}

#[test]
fn test_decode_truncated_is_incomplete() {
    assert_eq!(decode_varint(&[0xFF, 0xFF]), VarintDecode::Incomplete);
    assert_eq!(decode_varint(&[0x80, 0x80, 0x80, 0x80]), VarintDecode::Incomplete);
}

#[test]
fn test_decode_rejects_more_than_five_bytes() {
    assert_eq!(
        decode_varint(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]),
        VarintDecode::TooLong
    );
    assert_eq!(
        decode_varint(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF]),
        VarintDecode::TooLong
    );
}

#[test]
fn test_decode_rejects_fifth_byte_overflow() {
    // Bits beyond 32 cannot be represented
    assert_eq!(
        decode_varint(&[0xFF, 0xFF, 0xFF, 0xFF, 0x1F]),
        VarintDecode::TooLong
    );
}
