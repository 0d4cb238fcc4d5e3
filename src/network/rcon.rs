//! Remote Console Client
//!
//! Authenticates against a console endpoint and runs one command at a time.
//!
//! ## Session States
//! ```text
//! Disconnected ──► Connecting ──► Authenticating ──► Ready ◄──► Executing
//!      ▲                │               │              │            │
//!      └────────────────┴───────────────┴──────────────┴────────────┘
//!                     (any error, or disconnect())
//! ```
//!
//! ## Request id quirk
//! Only the `-1` sentinel in a response is acted on. Some servers do not
//! echo the request id faithfully, so a mismatch is logged and accepted.
//! Because of this, two commands must never be in flight on one session;
//! share a session across threads through [`super::SharedRconClient`].

use crate::config::Config;
use crate::error::{Result, WireError};
use crate::protocol::{
    encode_packet, generate_request_id, read_packet, GameCommand, RconPacket,
};

use super::Connection;

/// Where a console session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RconState {
    Disconnected,
    Connecting,
    Authenticating,
    Ready,
    Executing,
}

/// A reusable console session
pub struct RconClient {
    /// Target, credentials and timeouts
    config: Config,

    /// Open, authenticated socket (only while `Ready`/`Executing`)
    connection: Option<Connection>,

    state: RconState,
}

impl RconClient {
    /// Create a disconnected session
    pub fn new(config: Config) -> Self {
        Self {
            config,
            connection: None,
            state: RconState::Disconnected,
        }
    }

    pub fn state(&self) -> RconState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == RconState::Ready
    }

    /// Connect and authenticate
    ///
    /// A no-op when already `Ready`. On any failure the socket is closed and
    /// the session is back to `Disconnected`.
    pub fn connect(&mut self) -> Result<()> {
        if self.state == RconState::Ready {
            return Ok(());
        }

        self.disconnect();
        match self.establish() {
            Ok(connection) => {
                self.connection = Some(connection);
                self.state = RconState::Ready;
                Ok(())
            }
            Err(e) => {
                self.state = RconState::Disconnected;
                Err(e)
            }
        }
    }

    /// Open the socket and run the login exchange
    fn establish(&mut self) -> Result<Connection> {
        self.config.validate_rcon()?;
        let addr = self.config.rcon_addr();

        self.state = RconState::Connecting;
        tracing::debug!("Connecting to remote console at {}", addr);
        let mut connection = Connection::open(&addr, &self.config)?;

        self.state = RconState::Authenticating;
        let request_id = generate_request_id();
        let login = RconPacket::auth(request_id, &self.config.rcon_password);
        connection.send(&encode_packet(&login))?;

        let deadline = connection.read_deadline();
        let response = read_packet(&mut connection, deadline, self.config.max_packet_size, &addr)?;

        if response.is_auth_failure() {
            tracing::warn!("Remote console at {} rejected the password", addr);
            return Err(WireError::AuthenticationFailed { addr });
        }
        if response.request_id != request_id {
            tracing::debug!(
                "Auth response id {} does not match sent id {}; accepting",
                response.request_id,
                request_id
            );
        }

        tracing::debug!("Authenticated with remote console at {}", addr);
        Ok(connection)
    }

    /// Run one command and return the server's reply text
    ///
    /// A disconnected session reconnects (and re-authenticates) once first;
    /// if that fails its error is returned and nothing is sent.
    pub fn command(&mut self, command: &str) -> Result<String> {
        let frame_size = RconPacket::command(0, command).body_size();
        if frame_size > self.config.max_packet_size {
            return Err(WireError::InvalidCommand(format!(
                "command frame of {} bytes exceeds {} bytes",
                frame_size, self.config.max_packet_size
            )));
        }

        if self.state != RconState::Ready {
            tracing::debug!("Session not ready; reconnecting before command");
            self.connect()?;
        }

        let connection = match self.connection.as_mut() {
            Some(connection) => connection,
            None => {
                self.state = RconState::Disconnected;
                return Err(WireError::UnexpectedClose {
                    addr: self.config.rcon_addr(),
                });
            }
        };

        self.state = RconState::Executing;
        match Self::exchange(connection, command, self.config.max_packet_size) {
            Ok(reply) => {
                self.state = RconState::Ready;
                Ok(reply)
            }
            Err(e) => {
                tracing::debug!("Command failed, dropping session: {}", e);
                self.disconnect();
                Err(e)
            }
        }
    }

    /// Run a named command
    pub fn execute(&mut self, command: &GameCommand) -> Result<String> {
        self.command(&command.to_command_line())
    }

    /// Close the socket; safe to call repeatedly or before any connect
    pub fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
        }
        self.state = RconState::Disconnected;
    }

    fn exchange(connection: &mut Connection, command: &str, max_size: usize) -> Result<String> {
        let request_id = generate_request_id();
        let request = RconPacket::command(request_id, command);
        tracing::trace!("Sending command {:?} (id {})", command, request_id);
        connection.send(&encode_packet(&request))?;

        let deadline = connection.read_deadline();
        let peer = connection.peer_addr().to_string();
        let response = read_packet(connection, deadline, max_size, &peer)?;

        if response.is_auth_failure() {
            return Err(WireError::AuthenticationFailed { addr: peer });
        }
        if response.request_id != request_id {
            tracing::debug!(
                "Response id {} does not match sent id {}; accepting",
                response.request_id,
                request_id
            );
        }

        Ok(response.payload_text())
    }
}

impl Drop for RconClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Connect, authenticate, run one command and disconnect
pub fn rcon_command(config: &Config, command: &str) -> Result<String> {
    let mut client = RconClient::new(config.clone());
    let reply = client.command(command);
    client.disconnect();
    reply
}
