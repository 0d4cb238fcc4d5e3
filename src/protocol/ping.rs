//! Server list ping codec
//!
//! ## Wire Format
//! Every packet is a varint length followed by that many bytes:
//! ```text
//! ┌──────────────┬────────────────┬──────────────────────────────┐
//! │ Len (varint) │ PacketId(var)  │          Fields              │
//! └──────────────┴────────────────┴──────────────────────────────┘
//! ```
//!
//! ### Handshake fields (packet id 0x00)
//! - protocol version (varint, `-1` for "any")
//! - server address (varint length + UTF-8)
//! - server port (u16, big-endian)
//! - next state (varint, `1` for status)
//!
//! ### Status request (packet id 0x00)
//! - no fields
//!
//! ### Status response (packet id 0x00)
//! - JSON document (varint length + UTF-8)

use bytes::{Buf, BufMut, BytesMut};

use super::varint::{decode_varint, write_varint, VarintDecode};

pub const HANDSHAKE_PACKET_ID: i32 = 0x00;
pub const STATUS_REQUEST_PACKET_ID: i32 = 0x00;
pub const STATUS_RESPONSE_PACKET_ID: i32 = 0x00;

/// Handshake protocol version meaning "unspecified"
pub const PROTOCOL_VERSION_ANY: i32 = -1;

/// Handshake next state requesting status
pub const NEXT_STATE_STATUS: i32 = 1;

/// Packets this client sends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerboundPacket<'a> {
    Handshake {
        protocol_version: i32,
        host: &'a str,
        port: u16,
        next_state: i32,
    },
    StatusRequest,
}

impl ServerboundPacket<'_> {
    pub fn packet_id(&self) -> i32 {
        match self {
            ServerboundPacket::Handshake { .. } => HANDSHAKE_PACKET_ID,
            ServerboundPacket::StatusRequest => STATUS_REQUEST_PACKET_ID,
        }
    }

    /// Encode packet id and fields, then prefix the result with its length
    pub fn encode(&self) -> Vec<u8> {
        let mut body = BytesMut::with_capacity(64);
        write_varint(&mut body, self.packet_id());

        if let ServerboundPacket::Handshake {
            protocol_version,
            host,
            port,
            next_state,
        } = self
        {
            write_varint(&mut body, *protocol_version);
            write_varint(&mut body, host.len() as i32);
            body.put_slice(host.as_bytes());
            body.put_u16(*port);
            write_varint(&mut body, *next_state);
        }

        let mut framed = BytesMut::with_capacity(body.len() + 5);
        write_varint(&mut framed, body.len() as i32);
        framed.put_slice(&body);
        framed.to_vec()
    }
}

/// Handshake announcing a status query against `host:port`
pub fn encode_handshake(host: &str, port: u16) -> Vec<u8> {
    ServerboundPacket::Handshake {
        protocol_version: PROTOCOL_VERSION_ANY,
        host,
        port,
        next_state: NEXT_STATE_STATUS,
    }
    .encode()
}

/// The empty status request
pub fn encode_status_request() -> Vec<u8> {
    ServerboundPacket::StatusRequest.encode()
}

// =============================================================================
// Response parsing
// =============================================================================

/// Result of trying to parse a status response out of buffered bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// More bytes are needed
    Incomplete,

    /// The bytes can never become a valid response
    Invalid(String),

    /// The status JSON text and how many buffered bytes the packet used
    Complete { json: String, consumed: usize },
}

/// Parse a status response from the front of `buf` without consuming it
///
/// Inner fields are bounded by the bytes actually present, so a packet whose
/// declared length undercounts its contents reads as `Incomplete` until the
/// rest arrives.
pub fn try_parse_status(buf: &[u8]) -> ParseOutcome {
    let (packet_len, mut offset) = match read_length(buf, "packet length") {
        Ok(Some(field)) => field,
        Ok(None) => return ParseOutcome::Incomplete,
        Err(reason) => return ParseOutcome::Invalid(reason),
    };
    let packet_end = offset + packet_len;
    if buf.len() < packet_end {
        return ParseOutcome::Incomplete;
    }

    let packet_id = match decode_varint(&buf[offset..]) {
        VarintDecode::Complete { value, len } => {
            offset += len;
            value
        }
        VarintDecode::Incomplete => return ParseOutcome::Incomplete,
        VarintDecode::TooLong => {
            return ParseOutcome::Invalid("packet id varint too long".to_string())
        }
    };
    if packet_id != STATUS_RESPONSE_PACKET_ID {
        return ParseOutcome::Invalid(format!("unexpected packet id 0x{:02x}", packet_id));
    }

    let (json_len, len) = match read_length(&buf[offset..], "JSON length") {
        Ok(Some(field)) => field,
        Ok(None) => return ParseOutcome::Incomplete,
        Err(reason) => return ParseOutcome::Invalid(reason),
    };
    offset += len;

    let json_end = offset + json_len;
    if buf.len() < json_end {
        return ParseOutcome::Incomplete;
    }

    match std::str::from_utf8(&buf[offset..json_end]) {
        Ok(json) => ParseOutcome::Complete {
            json: json.to_string(),
            consumed: packet_end.max(json_end),
        },
        Err(e) => ParseOutcome::Invalid(format!("status JSON is not UTF-8: {}", e)),
    }
}

/// Non-negative varint length and its encoded size; `None` when truncated
fn read_length(buf: &[u8], what: &str) -> Result<Option<(usize, usize)>, String> {
    match decode_varint(buf) {
        VarintDecode::Complete { value, len } => usize::try_from(value)
            .map(|length| Some((length, len)))
            .map_err(|_| format!("negative {}: {}", what, value)),
        VarintDecode::Incomplete => Ok(None),
        VarintDecode::TooLong => Err(format!("{} varint too long", what)),
    }
}

/// Accumulates socket reads until a full status response is buffered
pub struct StatusAccumulator {
    buffer: BytesMut,
    max_packet_size: usize,
}

impl StatusAccumulator {
    pub fn new(max_packet_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
            max_packet_size,
        }
    }

    /// Append freshly read bytes
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Try to parse the buffered bytes; a complete packet is consumed
    pub fn try_parse(&mut self) -> ParseOutcome {
        match try_parse_status(&self.buffer) {
            ParseOutcome::Complete { json, consumed } => {
                self.buffer.advance(consumed);
                ParseOutcome::Complete { json, consumed }
            }
            ParseOutcome::Incomplete if self.buffer.len() > self.max_packet_size => {
                ParseOutcome::Invalid(format!(
                    "response exceeds {} bytes without completing",
                    self.max_packet_size
                ))
            }
            outcome => outcome,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
