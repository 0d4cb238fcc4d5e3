//! Tests for the framed-stream reader
//!
//! These tests verify:
//! - Reassembly of partial reads into one buffer
//! - Peer close vs. timeout vs. I/O error reporting
//! - Little-endian and varint length-prefixed frames

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read};
use std::time::{Duration, Instant};

use rconping::protocol::encode_varint;
use rconping::stream::{
    read_chunk, read_exact, read_le_frame, read_varint, read_varint_frame, TimedRead,
};
use rconping::ReadError;

// =============================================================================
// Helper Functions
// =============================================================================

/// One scripted result of a `read` call
enum Step {
    Data(Vec<u8>),
    Fail(ErrorKind),
}

/// Byte source that replays a fixed script of reads, then reports EOF
struct ScriptedSource {
    steps: VecDeque<Step>,
    reads: usize,
    timeouts_set: Vec<Option<Duration>>,
}

impl ScriptedSource {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            reads: 0,
            timeouts_set: Vec::new(),
        }
    }

    fn chunks(chunks: &[&[u8]]) -> Self {
        Self::new(chunks.iter().map(|c| Step::Data(c.to_vec())).collect())
    }
}

impl Read for ScriptedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        match self.steps.pop_front() {
            None => Ok(0),
            Some(Step::Fail(kind)) => Err(io::Error::new(kind, "scripted failure")),
            Some(Step::Data(mut data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    self.steps.push_front(Step::Data(data.split_off(n)));
                }
                Ok(n)
            }
        }
    }
}

impl TimedRead for ScriptedSource {
    fn limit_next_read(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        self.timeouts_set.push(timeout);
        Ok(())
    }
}

fn soon() -> Instant {
    Instant::now() + Duration::from_secs(5)
}

// =============================================================================
// read_exact Tests
// =============================================================================

#[test]
fn test_read_exact_reassembles_partial_chunks() {
    let mut source = ScriptedSource::chunks(&[&[1, 2], &[3], &[4, 5, 6]]);

    let bytes = read_exact(&mut source, 6, soon()).unwrap();

    assert_eq!(bytes, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(source.reads, 3);
}

#[test]
fn test_read_exact_leaves_surplus_unread() {
    let mut source = ScriptedSource::chunks(&[&[1, 2, 3, 4, 5]]);

    let first = read_exact(&mut source, 2, soon()).unwrap();
    let second = read_exact(&mut source, 3, soon()).unwrap();

    assert_eq!(first, vec![1, 2]);
    assert_eq!(second, vec![3, 4, 5]);
}

#[test]
fn test_read_exact_zero_bytes_does_not_read() {
    let mut source = ScriptedSource::chunks(&[&[9]]);

    let bytes = read_exact(&mut source, 0, soon()).unwrap();

    assert!(bytes.is_empty());
    assert_eq!(source.reads, 0);
}

#[test]
fn test_read_exact_reports_close_with_progress() {
    let mut source = ScriptedSource::chunks(&[&[1, 2]]);

    match read_exact(&mut source, 4, soon()) {
        Err(ReadError::Closed { expected, received }) => {
            assert_eq!(expected, 4);
            assert_eq!(received, 2);
        }
        other => panic!("Expected Closed, got {:?}", other),
    }
}

#[test]
fn test_read_exact_maps_would_block_to_timeout() {
    let mut source = ScriptedSource::new(vec![
        Step::Data(vec![1]),
        Step::Fail(ErrorKind::WouldBlock),
    ]);

    assert!(matches!(
        read_exact(&mut source, 3, soon()),
        Err(ReadError::TimedOut)
    ));
}

#[test]
fn test_read_exact_maps_timed_out_to_timeout() {
    let mut source = ScriptedSource::new(vec![Step::Fail(ErrorKind::TimedOut)]);

    assert!(matches!(
        read_exact(&mut source, 1, soon()),
        Err(ReadError::TimedOut)
    ));
}

#[test]
fn test_read_exact_retries_interrupted() {
    let mut source = ScriptedSource::new(vec![
        Step::Fail(ErrorKind::Interrupted),
        Step::Data(vec![7, 8]),
    ]);

    assert_eq!(read_exact(&mut source, 2, soon()).unwrap(), vec![7, 8]);
}

#[test]
fn test_read_exact_passes_other_errors_through() {
    let mut source = ScriptedSource::new(vec![Step::Fail(ErrorKind::ConnectionReset)]);

    match read_exact(&mut source, 1, soon()) {
        Err(ReadError::Io(e)) => assert_eq!(e.kind(), ErrorKind::ConnectionReset),
        other => panic!("Expected Io, got {:?}", other),
    }
}

#[test]
fn test_read_exact_expired_deadline_times_out_without_reading() {
    let mut source = ScriptedSource::chunks(&[&[1]]);
    let deadline = Instant::now();
    std::thread::sleep(Duration::from_millis(2));

    assert!(matches!(
        read_exact(&mut source, 1, deadline),
        Err(ReadError::TimedOut)
    ));
    assert_eq!(source.reads, 0);
}

#[test]
fn test_read_exact_bounds_each_read_by_remaining_time() {
    let mut source = ScriptedSource::chunks(&[&[1], &[2]]);

    read_exact(&mut source, 2, soon()).unwrap();

    assert_eq!(source.timeouts_set.len(), 2);
    for timeout in &source.timeouts_set {
        let timeout = timeout.expect("a bounded read");
        assert!(timeout <= Duration::from_secs(5));
        assert!(timeout > Duration::ZERO);
    }
}

// =============================================================================
// read_chunk Tests
// =============================================================================

#[test]
fn test_read_chunk_returns_what_is_available() {
    let mut source = ScriptedSource::chunks(&[&[1, 2, 3]]);
    let mut buf = [0u8; 16];

    let n = read_chunk(&mut source, &mut buf, soon()).unwrap();

    assert_eq!(&buf[..n], &[1, 2, 3]);
}

#[test]
fn test_read_chunk_reports_close() {
    let mut source = ScriptedSource::chunks(&[]);
    let mut buf = [0u8; 16];

    assert!(matches!(
        read_chunk(&mut source, &mut buf, soon()),
        Err(ReadError::Closed { received: 0, .. })
    ));
}

// =============================================================================
// Length-prefixed Frame Tests
// =============================================================================

#[test]
fn test_read_le_frame_split_across_header_and_body() {
    let mut source = ScriptedSource::chunks(&[&[3, 0], &[0, 0, b'a'], &[b'b', b'c', b'x']]);

    let body = read_le_frame(&mut source, soon(), 1024).unwrap();

    assert_eq!(body, b"abc");
}

#[test]
fn test_read_le_frame_rejects_negative_size() {
    let size = (-5i32).to_le_bytes();
    let mut source = ScriptedSource::chunks(&[&size]);

    assert!(matches!(
        read_le_frame(&mut source, soon(), 1024),
        Err(ReadError::Malformed(_))
    ));
}

#[test]
fn test_read_le_frame_rejects_oversized() {
    let size = 2048i32.to_le_bytes();
    let mut source = ScriptedSource::chunks(&[&size]);

    assert!(matches!(
        read_le_frame(&mut source, soon(), 1024),
        Err(ReadError::Malformed(_))
    ));
}

#[test]
fn test_read_varint_reads_one_byte_at_a_time() {
    let mut source = ScriptedSource::chunks(&[&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0x42]]);

    assert_eq!(read_varint(&mut source, soon()).unwrap(), -1);
    // The byte after the varint is still unread
    assert_eq!(read_exact(&mut source, 1, soon()).unwrap(), vec![0x42]);
}

#[test]
fn test_read_varint_rejects_six_bytes() {
    let mut source = ScriptedSource::chunks(&[&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]]);

    assert!(matches!(
        read_varint(&mut source, soon()),
        Err(ReadError::Malformed(_))
    ));
}

#[test]
fn test_read_varint_frame() {
    let mut frame = encode_varint(300);
    frame.extend(std::iter::repeat(0xAB).take(300));
    let (head, tail) = frame.split_at(1);
    let mut source = ScriptedSource::chunks(&[head, tail]);

    let body = read_varint_frame(&mut source, soon(), 1024).unwrap();

    assert_eq!(body.len(), 300);
    assert!(body.iter().all(|&b| b == 0xAB));
}

#[test]
fn test_read_varint_frame_close_mid_body() {
    let mut frame = encode_varint(10);
    frame.extend_from_slice(&[1, 2, 3]);
    let mut source = ScriptedSource::chunks(&[frame.as_slice()]);

    assert!(matches!(
        read_varint_frame(&mut source, soon(), 1024),
        Err(ReadError::Closed {
            expected: 10,
            received: 3
        })
    ));
}
