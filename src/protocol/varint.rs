//! Variable-length integers
//!
//! 32-bit signed values, 7 bits per byte, least-significant group first.
//! The high bit of each byte flags a continuation. Negative values wrap
//! into the unsigned 32-bit domain, so `-1` always takes the full 5 bytes.

use bytes::{BufMut, BytesMut};

/// 32 bits need at most 5 groups of 7
pub const MAX_VARINT_LEN: usize = 5;

/// Outcome of decoding a varint from the front of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintDecode {
    /// A full varint: its value and how many bytes it occupied
    Complete { value: i32, len: usize },

    /// The buffer ends before the final byte
    Incomplete,

    /// More than 5 bytes, or a fifth byte carrying bits past bit 31
    TooLong,
}

/// Append the varint encoding of `value` to `buf`
pub fn write_varint(buf: &mut BytesMut, value: i32) {
    let mut remaining = value as u32;
    loop {
        let group = (remaining & 0x7F) as u8;
        remaining >>= 7;
        if remaining == 0 {
            buf.put_u8(group);
            return;
        }
        buf.put_u8(group | 0x80);
    }
}

/// Encode `value` as a standalone varint
pub fn encode_varint(value: i32) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(MAX_VARINT_LEN);
    write_varint(&mut buf, value);
    buf.to_vec()
}

/// Decode the varint at the start of `bytes` without consuming anything
pub fn decode_varint(bytes: &[u8]) -> VarintDecode {
    let mut result: u32 = 0;

    for (index, &byte) in bytes.iter().enumerate() {
        if index == MAX_VARINT_LEN {
            return VarintDecode::TooLong;
        }
        // Only the low 4 bits of the fifth group fit in 32 bits
        if index == MAX_VARINT_LEN - 1 && byte & 0x70 != 0 {
            return VarintDecode::TooLong;
        }

        result |= u32::from(byte & 0x7F) << (7 * index);

        if byte & 0x80 == 0 {
            return VarintDecode::Complete {
                value: result as i32,
                len: index + 1,
            };
        }
    }

    if bytes.len() >= MAX_VARINT_LEN {
        VarintDecode::TooLong
    } else {
        VarintDecode::Incomplete
    }
}

/// Number of bytes `value` occupies once encoded
pub fn varint_len(value: i32) -> usize {
    let bits = 32 - (value as u32).leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}
