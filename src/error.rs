//! Error types for rconping
//!
//! Two layers:
//! - [`ReadError`]: transport-only conditions raised by the stream reader
//! - [`WireError`]: the client-facing taxonomy, carrying the peer address

use thiserror::Error;

/// Result type alias using WireError
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type for both protocol clients
#[derive(Debug, Error)]
pub enum WireError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Connect to {addr} failed: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out waiting on {addr}")]
    ReadTimeout { addr: String },

    #[error("Connection to {addr} closed mid-frame")]
    UnexpectedClose { addr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Authentication to {addr} rejected")]
    AuthenticationFailed { addr: String },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WireError {
    /// True for failures of the connection itself rather than of the protocol
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            WireError::ConnectFailed { .. }
                | WireError::ReadTimeout { .. }
                | WireError::UnexpectedClose { .. }
                | WireError::Io(_)
        )
    }

    /// Translate a stream-level failure, attaching the peer address
    pub fn from_read(err: ReadError, addr: &str) -> Self {
        match err {
            ReadError::TimedOut => WireError::ReadTimeout {
                addr: addr.to_string(),
            },
            ReadError::Closed { .. } => WireError::UnexpectedClose {
                addr: addr.to_string(),
            },
            ReadError::Io(e) => WireError::Io(e),
            ReadError::Malformed(reason) => WireError::ProtocolViolation(reason),
        }
    }
}

/// Conditions surfaced by the framed-stream reader
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Read deadline elapsed")]
    TimedOut,

    #[error("Peer closed the stream after {received} of {expected} bytes")]
    Closed { expected: usize, received: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A length field could not be interpreted (oversized varint, negative
    /// or out-of-range size)
    #[error("Malformed length field: {0}")]
    Malformed(String),
}
