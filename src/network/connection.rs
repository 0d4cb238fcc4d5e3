//! Connection
//!
//! A short-lived TCP connection to a game server endpoint.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{Result, WireError};
use crate::stream::{is_timeout, TimedRead};

/// An open socket owned by exactly one call
///
/// The socket is shut down when the connection is closed or dropped, so
/// every exit path releases it.
pub struct Connection {
    /// TCP stream
    stream: TcpStream,

    /// `host:port` as the caller gave it, for errors and logging
    peer_addr: String,

    /// Budget for each blocking read
    read_timeout: Duration,
}

impl Connection {
    /// Connect to `addr`, trying every resolved address in turn
    ///
    /// Every failure here, including resolution and connect timeout, is
    /// reported as `ConnectFailed` with the address attached.
    pub fn open(addr: &str, config: &Config) -> Result<Self> {
        let connect_failed = |source: io::Error| WireError::ConnectFailed {
            addr: addr.to_string(),
            source,
        };

        let candidates = addr.to_socket_addrs().map_err(connect_failed)?;

        let mut last_error = None;
        for candidate in candidates {
            tracing::trace!("Connecting to {} ({})", addr, candidate);
            match TcpStream::connect_timeout(&candidate, config.connect_timeout()) {
                Ok(stream) => {
                    let mut connection = Self {
                        stream,
                        peer_addr: addr.to_string(),
                        read_timeout: config.read_timeout(),
                    };
                    connection
                        .configure(config.read_timeout_ms, config.write_timeout_ms)
                        .map_err(connect_failed)?;
                    tracing::debug!("Connected to {}", addr);
                    return Ok(connection);
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(connect_failed(last_error.unwrap_or_else(|| {
            io::Error::new(ErrorKind::AddrNotAvailable, "no addresses resolved")
        })))
    }

    /// Disable Nagle and set socket timeouts
    fn configure(&mut self, read_ms: u64, write_ms: u64) -> io::Result<()> {
        self.stream.set_nodelay(true)?;
        if read_ms > 0 {
            self.stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            self.stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }
        Ok(())
    }

    /// Write a complete request
    pub fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let result = self.stream.write_all(bytes).and_then(|_| self.stream.flush());
        match result {
            Ok(()) => Ok(()),
            Err(e) if is_timeout(&e) => Err(WireError::ReadTimeout {
                addr: self.peer_addr.clone(),
            }),
            Err(e) if is_closed(&e) => Err(WireError::UnexpectedClose {
                addr: self.peer_addr.clone(),
            }),
            Err(e) => Err(WireError::Io(e)),
        }
    }

    /// Deadline for the next blocking read
    pub fn read_deadline(&self) -> Instant {
        Instant::now() + self.read_timeout
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Shut the socket down; dropping has the same effect
    pub fn close(self) {}
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl TimedRead for Connection {
    fn limit_next_read(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        self.stream.set_read_timeout(timeout)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Peer may already be gone
        let _ = self.stream.shutdown(Shutdown::Both);
        tracing::debug!("Closed connection to {}", self.peer_addr);
    }
}

fn is_closed(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted
    )
}
