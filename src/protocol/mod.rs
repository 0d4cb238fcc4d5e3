//! Protocol Module
//!
//! Wire formats for the two game-server protocols.
//!
//! ## Remote Console (RCON)
//! ```text
//! ┌──────────┬──────────────┬──────────────┬───────────────┬──────────┐
//! │ Size (4) │ RequestId(4) │ PacketType(4)│    Payload    │ 0x00 0x00│
//! └──────────┴──────────────┴──────────────┴───────────────┴──────────┘
//! ```
//!
//! ### Packet Types
//! - 3: AUTH          - Payload: password
//! - 2: EXEC_COMMAND  - Payload: command text
//! - 2: AUTH_RESPONSE - request id `-1` means rejected
//! - 0: RESPONSE_VALUE
//!
//! ## Server List Ping (SLP)
//! ```text
//! ┌──────────────┬────────────────┬──────────────────────────────┐
//! │ Len (varint) │ PacketId(var)  │          Fields              │
//! └──────────────┴────────────────┴──────────────────────────────┘
//! ```
//!
//! ### Exchange
//! - Client: handshake (0x00, next state 1), status request (0x00)
//! - Server: status response (0x00) carrying a JSON document

pub mod varint;
pub mod rcon;
pub mod ping;
mod status;
mod command;

pub use varint::{decode_varint, encode_varint, write_varint, VarintDecode, MAX_VARINT_LEN};
pub use rcon::{
    decode_packet, encode_packet, generate_request_id, read_packet, write_packet, PacketType,
    RconPacket, AUTH_FAILED_ID,
};
pub use ping::{
    encode_handshake, encode_status_request, try_parse_status, ParseOutcome, ServerboundPacket,
    StatusAccumulator,
};
pub use status::{Probe, ServerStatus};
pub use command::{render_template, GameCommand};
