//! Status Client
//!
//! One-shot, unauthenticated server list ping.
//!
//! The response has no fixed-size prefix, so reads are accumulated and
//! re-parsed until a whole packet is present instead of asking the stream
//! for an exact byte count.

use crate::config::Config;
use crate::error::{Result, WireError};
use crate::protocol::{
    encode_handshake, encode_status_request, ParseOutcome, Probe, ServerStatus,
    StatusAccumulator,
};
use crate::stream::read_chunk;

use super::Connection;

/// Size of each socket read while accumulating
const READ_CHUNK_SIZE: usize = 4096;

/// Queries live server status
pub struct StatusClient {
    config: Config,
}

impl StatusClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Query the server, reporting why it failed if it does
    pub fn try_status(&self) -> Result<ServerStatus> {
        self.config.validate_status()?;
        let addr = self.config.status_addr();

        let mut connection = Connection::open(&addr, &self.config)?;
        let result = self.query(&mut connection);
        connection.close();
        result
    }

    /// Liveness probe: every failure reads as `Unreachable`
    pub fn probe(&self) -> Probe {
        match self.try_status() {
            Ok(status) => Probe::Online(status),
            Err(e) => {
                tracing::debug!("Status probe of {} failed: {}", self.config.status_addr(), e);
                Probe::Unreachable
            }
        }
    }

    fn query(&self, connection: &mut Connection) -> Result<ServerStatus> {
        connection.send(&encode_handshake(&self.config.host, self.config.status_port))?;
        connection.send(&encode_status_request())?;

        let mut accumulator = StatusAccumulator::new(self.config.max_packet_size);
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        loop {
            let deadline = connection.read_deadline();
            let read = read_chunk(connection, &mut chunk, deadline)
                .map_err(|e| WireError::from_read(e, connection.peer_addr()))?;
            accumulator.push(&chunk[..read]);
            tracing::trace!("Buffered {} status bytes", accumulator.len());

            match accumulator.try_parse() {
                ParseOutcome::Incomplete => continue,
                ParseOutcome::Invalid(reason) => return Err(WireError::ProtocolViolation(reason)),
                ParseOutcome::Complete { json, .. } => return ServerStatus::from_json(&json),
            }
        }
    }
}

/// Ping `config.host:config.status_port` once
pub fn ping(config: &Config) -> Probe {
    StatusClient::new(config.clone()).probe()
}
