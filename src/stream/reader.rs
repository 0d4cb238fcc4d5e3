//! Stream Reader
//!
//! Exact-length and length-prefixed reads over a blocking byte stream.

use std::io::{self, ErrorKind, Read};
use std::net::TcpStream;
use std::time::{Duration, Instant};

use crate::error::ReadError;
use crate::protocol::varint::{decode_varint, VarintDecode, MAX_VARINT_LEN};

/// A byte source whose next blocking read can be bounded in time
pub trait TimedRead: Read {
    /// Bound the next blocking read. `None` blocks indefinitely.
    fn limit_next_read(&mut self, timeout: Option<Duration>) -> io::Result<()>;
}

impl TimedRead for TcpStream {
    fn limit_next_read(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        self.set_read_timeout(timeout)
    }
}

/// In-memory sources never block
impl<T: AsRef<[u8]>> TimedRead for io::Cursor<T> {
    fn limit_next_read(&mut self, _timeout: Option<Duration>) -> io::Result<()> {
        Ok(())
    }
}

impl<T: TimedRead + ?Sized> TimedRead for &mut T {
    fn limit_next_read(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        (**self).limit_next_read(timeout)
    }
}

/// Read exactly `n` bytes, reassembling however many partial reads it takes
///
/// Fails with `Closed` on a zero-length read and `TimedOut` once `deadline`
/// passes; a short buffer is never returned.
pub fn read_exact<S: TimedRead + ?Sized>(
    source: &mut S,
    n: usize,
    deadline: Instant,
) -> Result<Vec<u8>, ReadError> {
    let mut buf = vec![0u8; n];
    let mut filled = 0;

    while filled < n {
        arm(source, deadline)?;
        match source.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(ReadError::Closed {
                    expected: n,
                    received: filled,
                })
            }
            Ok(read) => filled += read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if is_timeout(&e) => return Err(ReadError::TimedOut),
            Err(e) => return Err(ReadError::Io(e)),
        }
    }

    Ok(buf)
}

/// Read whatever the transport has ready (at least one byte) into `buf`
pub fn read_chunk<S: TimedRead + ?Sized>(
    source: &mut S,
    buf: &mut [u8],
    deadline: Instant,
) -> Result<usize, ReadError> {
    loop {
        arm(source, deadline)?;
        match source.read(buf) {
            Ok(0) => {
                return Err(ReadError::Closed {
                    expected: buf.len(),
                    received: 0,
                })
            }
            Ok(read) => return Ok(read),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if is_timeout(&e) => return Err(ReadError::TimedOut),
            Err(e) => return Err(ReadError::Io(e)),
        }
    }
}

/// Read a frame prefixed by a 4-byte little-endian signed size
///
/// Returns the body (the `size` bytes after the prefix).
pub fn read_le_frame<S: TimedRead + ?Sized>(
    source: &mut S,
    deadline: Instant,
    max_size: usize,
) -> Result<Vec<u8>, ReadError> {
    let header = read_exact(source, 4, deadline)?;
    let size = i32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let size = checked_length(size, max_size)?;
    read_exact(source, size, deadline)
}

/// Read a varint directly off the stream, one byte at a time
pub fn read_varint<S: TimedRead + ?Sized>(
    source: &mut S,
    deadline: Instant,
) -> Result<i32, ReadError> {
    let mut raw = Vec::with_capacity(MAX_VARINT_LEN);
    loop {
        let byte = read_exact(source, 1, deadline)?;
        raw.push(byte[0]);
        match decode_varint(&raw) {
            VarintDecode::Complete { value, .. } => return Ok(value),
            VarintDecode::Incomplete => continue,
            VarintDecode::TooLong => {
                return Err(ReadError::Malformed(format!(
                    "varint longer than {} bytes",
                    MAX_VARINT_LEN
                )))
            }
        }
    }
}

/// Read a frame prefixed by a varint length
pub fn read_varint_frame<S: TimedRead + ?Sized>(
    source: &mut S,
    deadline: Instant,
    max_size: usize,
) -> Result<Vec<u8>, ReadError> {
    let length = read_varint(source, deadline)?;
    let length = checked_length(length, max_size)?;
    read_exact(source, length, deadline)
}

// =============================================================================
// Helpers
// =============================================================================

/// Bound the next read by the time left until `deadline`
fn arm<S: TimedRead + ?Sized>(source: &mut S, deadline: Instant) -> Result<(), ReadError> {
    let remaining = deadline.saturating_duration_since(Instant::now());
    // A zero timeout is rejected by TcpStream, so treat it as expiry here.
    if remaining.is_zero() {
        return Err(ReadError::TimedOut);
    }
    source.limit_next_read(Some(remaining))?;
    Ok(())
}

fn checked_length(declared: i32, max_size: usize) -> Result<usize, ReadError> {
    let length = usize::try_from(declared)
        .map_err(|_| ReadError::Malformed(format!("negative length: {}", declared)))?;
    if length > max_size {
        return Err(ReadError::Malformed(format!(
            "length too large: {} bytes (max {})",
            length, max_size
        )));
    }
    Ok(length)
}

/// Blocking reads report an elapsed timeout as `WouldBlock` on Unix and
/// `TimedOut` on Windows.
pub(crate) fn is_timeout(err: &io::Error) -> bool {
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
