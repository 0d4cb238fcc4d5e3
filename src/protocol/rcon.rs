//! Remote console codec
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬──────────────┬──────────────┬───────────────┬──────────┐
//! │ Size (4) │ RequestId(4) │ PacketType(4)│    Payload    │ 0x00 0x00│
//! └──────────┴──────────────┴──────────────┴───────────────┴──────────┘
//! ```
//! All integers are signed 32-bit little-endian.
//! `Size` counts everything after itself: `4 + 4 + payload + 2`.

use std::io::Write;
use std::time::Instant;

use bytes::{BufMut, BytesMut};
use rand::Rng;

use crate::error::{Result, WireError};
use crate::stream::{read_le_frame, TimedRead};

/// Request id + packet type + two terminating nulls
pub const MIN_BODY_SIZE: usize = 10;

/// Request id the server answers with when the password is wrong
pub const AUTH_FAILED_ID: i32 = -1;

/// Console packet type
///
/// A newtype rather than an enum: `2` means "execute command" on the way
/// out and "auth response" on the way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PacketType(pub i32);

impl PacketType {
    pub const RESPONSE_VALUE: PacketType = PacketType(0);
    pub const EXEC_COMMAND: PacketType = PacketType(2);
    pub const AUTH_RESPONSE: PacketType = PacketType(2);
    pub const AUTH: PacketType = PacketType(3);
}

/// A single console frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RconPacket {
    pub request_id: i32,
    pub packet_type: PacketType,
    pub payload: Vec<u8>,
}

impl RconPacket {
    /// Login request carrying the password
    pub fn auth(request_id: i32, password: &str) -> Self {
        Self {
            request_id,
            packet_type: PacketType::AUTH,
            payload: password.as_bytes().to_vec(),
        }
    }

    /// Command execution request
    pub fn command(request_id: i32, command: &str) -> Self {
        Self {
            request_id,
            packet_type: PacketType::EXEC_COMMAND,
            payload: command.as_bytes().to_vec(),
        }
    }

    /// The `-1` sentinel, whatever the packet type or payload
    pub fn is_auth_failure(&self) -> bool {
        self.request_id == AUTH_FAILED_ID
    }

    /// Payload as text; invalid UTF-8 is replaced, never rejected
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// Value of the size field for this packet
    pub fn body_size(&self) -> usize {
        MIN_BODY_SIZE + self.payload.len()
    }
}

/// Fresh non-negative request identifier; only needs to vary between calls
pub fn generate_request_id() -> i32 {
    rand::thread_rng().gen_range(1..=i32::MAX)
}

// =============================================================================
// Encoding/Decoding
// =============================================================================

/// Encode a packet including its size prefix
pub fn encode_packet(packet: &RconPacket) -> Vec<u8> {
    let body_size = packet.body_size();

    let mut message = BytesMut::with_capacity(4 + body_size);
    message.put_i32_le(body_size as i32);
    message.put_i32_le(packet.request_id);
    message.put_i32_le(packet.packet_type.0);
    message.put_slice(&packet.payload);
    message.put_u8(0);
    message.put_u8(0);

    message.to_vec()
}

/// Decode a packet body (the bytes after the size prefix)
pub fn decode_packet(body: &[u8]) -> Result<RconPacket> {
    if body.len() < MIN_BODY_SIZE {
        return Err(WireError::ProtocolViolation(format!(
            "Console frame too short: expected at least {} bytes, got {}",
            MIN_BODY_SIZE,
            body.len()
        )));
    }

    let request_id = i32::from_le_bytes([body[0], body[1], body[2], body[3]]);
    let packet_type = i32::from_le_bytes([body[4], body[5], body[6], body[7]]);

    // Trailing pair is not verified; some servers pad differently.
    let payload = body[8..body.len() - 2].to_vec();

    Ok(RconPacket {
        request_id,
        packet_type: PacketType(packet_type),
        payload,
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a packet to a stream
pub fn write_packet<W: Write + ?Sized>(writer: &mut W, packet: &RconPacket) -> Result<()> {
    let bytes = encode_packet(packet);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read one complete packet from a stream
///
/// `peer` is only used to label transport errors.
pub fn read_packet<S: TimedRead + ?Sized>(
    source: &mut S,
    deadline: Instant,
    max_size: usize,
    peer: &str,
) -> Result<RconPacket> {
    let body =
        read_le_frame(source, deadline, max_size).map_err(|e| WireError::from_read(e, peer))?;
    decode_packet(&body)
}
